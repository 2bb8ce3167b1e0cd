//! # reposcout
//!
//! Exports repository search results to a CSV file sorted for people to read.
//!
//! ## Features
//!
//! - **Link Header Pagination**: Follows `rel="next"` until the result set is exhausted
//! - **Throttle Recovery**: Sleeps until the rate limit resets, then retries
//! - **Response Cache**: Optional on-disk cache for repeated runs
//! - **CSV Export**: Stars first, most recently updated next
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reposcout::cli::Runner;
//! use reposcout::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> reposcout::Result<()> {
//!     let settings = Settings {
//!         token: std::env::var("GITHUB_TOKEN").unwrap_or_default(),
//!         ..Settings::default()
//!     };
//!     let summary = Runner::new(settings).run().await?;
//!     println!("{} repositories written to {}", summary.fetched, summary.output.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Runner (cli::runner)                 │
//! │       Settings → Pager → CsvExporter → file          │
//! └──────────────────────────────────────────────────────┘
//!                            │
//! ┌──────────────┬───────────┴──────┬───────────────────┐
//! │  Pagination  │       HTTP       │      Output       │
//! ├──────────────┼──────────────────┼───────────────────┤
//! │ Link header  │ Throttle retry   │ Sort              │
//! │ Pager        │ Pacing           │ Truncate          │
//! │              │ Response cache   │ CSV               │
//! └──────────────┴──────────────────┴───────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Search payloads and the repository record
pub mod types;

/// Run configuration
pub mod config;

/// Rate-limited HTTP fetcher
pub mod http;

/// Response cache implementations
pub mod cache;

/// Link header parsing and the pager
pub mod pagination;

/// Truncation, sorting and CSV writing
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{Repository, SearchPage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
