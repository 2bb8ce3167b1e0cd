//! In-memory response cache

use super::{CacheEntry, ResponseCache};
use crate::error::Result;
use crate::http::ApiResponse;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

/// Process-local cache with a TTL
#[derive(Debug)]
pub struct MemoryCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    /// Create an empty cache
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Insert an entry as-is, keeping its timestamp
    pub async fn insert_entry(&self, key: impl Into<String>, entry: CacheEntry) {
        self.entries.write().await.insert(key.into(), entry);
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<ApiResponse> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(self.ttl, Utc::now()))
            .map(|entry| entry.response.clone())
    }

    async fn put(&self, key: &str, response: &ApiResponse) -> Result<()> {
        if !response.is_success() {
            return Ok(());
        }
        self.entries
            .write()
            .await
            .insert(key.to_string(), CacheEntry::new(response.clone()));
        Ok(())
    }
}
