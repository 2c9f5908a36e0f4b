//! Catalog caches
//!
//! `CatalogCache` is the single-slot in-memory cache: the whole collection is
//! the only key, so there is no eviction policy beyond the TTL stamp taken at
//! `put` time. `DiskCatalogCache` optionally backs it with one JSON file that
//! survives process restarts and self-invalidates on stale reads.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};
use crate::models::Pokemon;

/// Fixed name of the persistent cache file
pub const CACHE_FILE_NAME: &str = "pokemon-catalog.json";

struct CacheSlot {
    data: Arc<Vec<Pokemon>>,
    stored_at: Instant,
}

/// Single-slot in-memory catalog cache with a TTL
pub struct CatalogCache {
    ttl: Duration,
    slot: RwLock<Option<CacheSlot>>,
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached collection while it is fresh; `None` means the
    /// caller must re-fetch.
    pub async fn get(&self) -> Option<Arc<Vec<Pokemon>>> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|s| s.stored_at.elapsed() < self.ttl)
            .map(|s| Arc::clone(&s.data))
    }

    /// Replace the slot wholesale and restart the TTL window.
    pub async fn put(&self, data: Vec<Pokemon>) -> Arc<Vec<Pokemon>> {
        let data = Arc::new(data);
        let mut slot = self.slot.write().await;
        *slot = Some(CacheSlot {
            data: Arc::clone(&data),
            stored_at: Instant::now(),
        });
        data
    }
}

#[derive(Serialize, Deserialize)]
struct DiskCacheEntry {
    timestamp: DateTime<Utc>,
    data: Vec<Pokemon>,
}

/// Persistent catalog cache: one fixed-name JSON file holding
/// `{ timestamp, data }`, invalidated (deleted) when read after its TTL.
pub struct DiskCatalogCache {
    dir: PathBuf,
    ttl: Duration,
}

impl DiskCatalogCache {
    pub fn new(dir: PathBuf, ttl: Duration) -> Self {
        Self { dir, ttl }
    }

    fn file_path(&self) -> PathBuf {
        self.dir.join(CACHE_FILE_NAME)
    }

    /// Load the cached collection if present and fresh. Stale or unreadable
    /// entries are removed on the way out.
    pub async fn load(&self) -> Option<Vec<Pokemon>> {
        let path = self.file_path();
        let bytes = fs::read(&path).await.ok()?;

        let entry: DiskCacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Discarding unreadable cache file {:?}: {}", path, e);
                self.invalidate().await;
                return None;
            }
        };

        let age = Utc::now().signed_duration_since(entry.timestamp);
        if age.to_std().map(|age| age >= self.ttl).unwrap_or(true) {
            debug!("Disk cache entry is stale, invalidating");
            self.invalidate().await;
            return None;
        }

        Some(entry.data)
    }

    pub async fn store(&self, data: &[Pokemon]) -> AppResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::cache(format!("Failed to create cache dir: {e}")))?;

        let entry = DiskCacheEntry {
            timestamp: Utc::now(),
            data: data.to_vec(),
        };
        let bytes = serde_json::to_vec(&entry)
            .map_err(|e| AppError::cache(format!("Failed to encode cache entry: {e}")))?;

        fs::write(self.file_path(), bytes)
            .await
            .map_err(|e| AppError::cache(format!("Failed to write cache file: {e}")))?;
        Ok(())
    }

    async fn invalidate(&self) {
        if let Err(e) = fs::remove_file(self.file_path()).await {
            debug!("Could not remove cache file: {}", e);
        }
    }
}
