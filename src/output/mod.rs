//! Output module
//!
//! Turns the collected result set into a sorted CSV file.
//!
//! # Overview
//!
//! This module provides:
//! - [`truncate`] for shortening long descriptions
//! - [`sort_repositories`] for the stars-then-recency ordering
//! - [`CsvExporter`] for writing the header and one row per repository

mod format;
mod writer;

pub use format::{truncate, DEFAULT_DESCRIPTION_LENGTH, ELLIPSIS};
pub use writer::{sort_repositories, CsvExporter, CsvExporterConfig, CSV_HEADER};

#[cfg(test)]
mod tests;
