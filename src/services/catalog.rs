//! Catalog resolution: memory cache, disk cache, then a fresh fetch
//!
//! `CatalogService` is the explicitly owned composition replacing any ambient
//! module-level cache state: constructed once per process and injected into
//! the web layer. Its boundary never raises — a failed fetch degrades to an
//! empty collection with an error marker the handlers translate into a
//! response header.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::CacheConfig;
use crate::models::Pokemon;
use crate::services::cache::{CatalogCache, DiskCatalogCache};
use crate::services::fetcher::PokemonFetcher;

/// Where the served collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
    Memory,
    Disk,
    Fresh,
}

impl CacheSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Disk => "disk",
            Self::Fresh => "fresh",
        }
    }
}

/// The resolved collection plus provenance
pub struct CatalogSnapshot {
    pub pokemon: Arc<Vec<Pokemon>>,
    pub source: CacheSource,
    /// Set when a fresh fetch attempt failed outright
    pub fetch_failed: bool,
}

pub struct CatalogService {
    fetcher: PokemonFetcher,
    memory: CatalogCache,
    disk: Option<DiskCatalogCache>,
}

impl CatalogService {
    pub fn new(fetcher: PokemonFetcher, cache: &CacheConfig) -> Self {
        let disk = cache
            .disk_enabled
            .then(|| DiskCatalogCache::new(cache.path.clone(), cache.disk_ttl));
        Self {
            fetcher,
            memory: CatalogCache::new(cache.memory_ttl),
            disk,
        }
    }

    /// Resolve the catalog, repopulating faster cache layers on the way back.
    ///
    /// Never returns an error: an unreachable upstream yields an empty
    /// collection with `fetch_failed` set. A superseding call simply
    /// overwrites the cache slot on completion.
    pub async fn get_catalog(&self) -> CatalogSnapshot {
        if let Some(pokemon) = self.memory.get().await {
            return CatalogSnapshot {
                pokemon,
                source: CacheSource::Memory,
                fetch_failed: false,
            };
        }

        if let Some(disk) = &self.disk {
            if let Some(data) = disk.load().await {
                info!("Serving catalog from disk cache: {} entries", data.len());
                let pokemon = self.memory.put(data).await;
                return CatalogSnapshot {
                    pokemon,
                    source: CacheSource::Disk,
                    fetch_failed: false,
                };
            }
        }

        info!("Fetching fresh catalog from upstream");
        match self.fetcher.fetch_all().await {
            Ok(data) => {
                info!("Fetched and cached {} Pokemon", data.len());
                if let Some(disk) = &self.disk {
                    if let Err(e) = disk.store(&data).await {
                        warn!("Failed to persist catalog to disk cache: {}", e);
                    }
                }
                let pokemon = self.memory.put(data).await;
                CatalogSnapshot {
                    pokemon,
                    source: CacheSource::Fresh,
                    fetch_failed: false,
                }
            }
            Err(e) => {
                // A failure is not cached: the next request retries.
                warn!("Catalog fetch failed: {}", e);
                CatalogSnapshot {
                    pokemon: Arc::new(Vec::new()),
                    source: CacheSource::Fresh,
                    fetch_failed: true,
                }
            }
        }
    }
}
