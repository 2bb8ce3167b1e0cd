//! Response cache module
//!
//! An opportunistic cache for identical GET requests. The fetcher consults
//! it before going to the network and stores successful responses after.
//! A cache only affects freshness: dropping it never changes what the pager
//! produces.
//!
//! # Implementations
//!
//! - [`NoCache`] - Always misses
//! - [`MemoryCache`] - In-process map with a TTL
//! - [`FileCache`] - JSON file on disk with a TTL, survives restarts

mod file;
mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;

use crate::error::Result;
use crate::http::ApiResponse;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default time-to-live for cached responses
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Storage for responses keyed by fully qualified request URL
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Fetch a fresh entry, if any
    async fn get(&self, key: &str) -> Option<ApiResponse>;

    /// Store a response. Non-2xx responses are ignored.
    async fn put(&self, key: &str, response: &ApiResponse) -> Result<()>;
}

/// Cache that stores nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

#[async_trait]
impl ResponseCache for NoCache {
    async fn get(&self, _key: &str) -> Option<ApiResponse> {
        None
    }

    async fn put(&self, _key: &str, _response: &ApiResponse) -> Result<()> {
        Ok(())
    }
}

/// A stored response with the time it was stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub stored_at: DateTime<Utc>,
    pub response: ApiResponse,
}

impl CacheEntry {
    /// Wrap a response stamped with the current time
    pub fn new(response: ApiResponse) -> Self {
        Self {
            stored_at: Utc::now(),
            response,
        }
    }

    /// Whether the entry is older than `ttl` at `now`
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now - self.stored_at > ttl,
            Err(_) => false,
        }
    }
}
