//! Common types used throughout reposcout
//!
//! Search API payloads and the repository record that flows from the pager
//! to the exporter.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// Ordered list of query parameters
pub type QueryParams = Vec<(String, String)>;

/// Timestamp layout used by the search API for `updated_at`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// ============================================================================
// Repository Record
// ============================================================================

/// One repository returned by the search API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// `owner/name`
    pub full_name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub stargazers_count: u64,

    #[serde(default)]
    pub language: Option<String>,

    /// Raw API timestamp, kept verbatim for output
    pub updated_at: String,

    pub html_url: String,
}

impl Repository {
    /// Parse `updated_at` as a UTC timestamp with second precision
    pub fn updated_at_utc(&self) -> Result<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(&self.updated_at, TIMESTAMP_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|_| Error::InvalidTimestamp {
                repository: self.full_name.clone(),
                value: self.updated_at.clone(),
            })
    }
}

// ============================================================================
// Search Page
// ============================================================================

/// One page of search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    /// Total number of matches the API reports for the query
    pub total_count: u64,

    /// Set when the API timed out before collecting every match
    #[serde(default)]
    pub incomplete_results: bool,

    #[serde(default)]
    pub items: Vec<Repository>,
}
