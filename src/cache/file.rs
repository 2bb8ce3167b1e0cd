//! File-backed response cache
//!
//! All entries live in one JSON document. It is read once when the cache is
//! opened and rewritten (temp file, then rename) after every insert.

use super::{CacheEntry, ResponseCache};
use crate::error::{Error, Result};
use crate::http::ApiResponse;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Cache persisted to a JSON file
#[derive(Debug)]
pub struct FileCache {
    path: PathBuf,
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl FileCache {
    /// Open the cache at `path`, loading existing entries.
    ///
    /// A missing file starts empty. An unreadable or corrupt file is logged
    /// and also starts empty; it is overwritten on the next insert.
    /// Expired entries are dropped while loading.
    pub fn open(path: impl AsRef<Path>, ttl: Duration) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut entries = match load_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring cache file {}: {e}", path.display());
                HashMap::new()
            }
        };

        let now = Utc::now();
        entries.retain(|_, entry| !entry.is_expired(ttl, now));
        debug!(
            "Opened cache {} with {} entries",
            path.display(),
            entries.len()
        );

        Self {
            path,
            ttl,
            entries: RwLock::new(entries),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries currently held
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn save(&self, entries: &HashMap<String, CacheEntry>) -> Result<()> {
        let contents = serde_json::to_string(entries)
            .map_err(|e| Error::cache(format!("Failed to serialize cache: {e}")))?;

        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::cache(format!("Failed to write cache file: {e}")))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::cache(format!("Failed to rename cache file: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl ResponseCache for FileCache {
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
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CacheEntry::new(response.clone()));
        self.save(&entries).await
    }
}

fn load_entries(path: &Path) -> Result<HashMap<String, CacheEntry>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::cache(format!("Failed to read cache file: {e}")))?;
    serde_json::from_str(&contents)
        .map_err(|e| Error::cache(format!("Failed to parse cache file: {e}")))
}
