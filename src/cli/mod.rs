//! CLI module
//!
//! Command-line interface for running an export.
//!
//! A single invocation searches, paginates to the end, and writes the CSV.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::{RunSummary, Runner};
