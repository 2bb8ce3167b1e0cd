//! Pagination module
//!
//! Follows RFC 5988 `Link` headers across a search result set.
//!
//! # Overview
//!
//! [`parse_link_header`] turns a raw `Link` value into relation → URL pairs.
//! [`Pager`] drives the HTTP client from the first page to the last, yielding
//! records in the order the API returns them.

mod link;
mod pager;
mod types;

pub use link::parse_link_header;
pub use pager::{Pager, NEXT_REL};
pub use types::PaginationState;
