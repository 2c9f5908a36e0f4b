use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;

use defaults::*;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream PokeAPI endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connection timeout for upstream requests. There is deliberately no
    /// total-request timeout; long transfers are bounded only by the platform.
    #[serde(default = "default_connect_timeout", with = "duration_serde::duration")]
    pub connect_timeout: Duration,
}

/// Detail fetch batching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Number of detail requests issued and joined together per batch
    #[serde(default = "default_detail_batch_size")]
    pub detail_batch_size: usize,
    /// Politeness delay between batches (not a correctness requirement)
    #[serde(default = "default_batch_delay", with = "duration_serde::duration")]
    pub batch_delay: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL for the in-memory catalog slot
    #[serde(default = "default_memory_ttl", with = "duration_serde::duration")]
    pub memory_ttl: Duration,
    /// Whether the on-disk cache file backs the in-memory slot
    #[serde(default = "default_disk_cache_enabled")]
    pub disk_enabled: bool,
    /// TTL for the on-disk cache file
    #[serde(default = "default_disk_ttl", with = "duration_serde::duration")]
    pub disk_ttl: Duration,
    /// Directory holding the cache file
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
    /// Freshness window advertised to downstream caches via Cache-Control
    #[serde(default = "default_freshness_window", with = "duration_serde::duration")]
    pub freshness_window: Duration,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_base_url() -> String {
    DEFAULT_UPSTREAM_BASE_URL.to_string()
}

fn default_connect_timeout() -> Duration {
    humantime::parse_duration(DEFAULT_CONNECT_TIMEOUT).expect("valid default")
}

fn default_detail_batch_size() -> usize {
    DEFAULT_DETAIL_BATCH_SIZE
}

fn default_batch_delay() -> Duration {
    humantime::parse_duration(DEFAULT_BATCH_DELAY).expect("valid default")
}

fn default_memory_ttl() -> Duration {
    humantime::parse_duration(DEFAULT_MEMORY_TTL).expect("valid default")
}

fn default_disk_cache_enabled() -> bool {
    DEFAULT_DISK_CACHE_ENABLED
}

fn default_disk_ttl() -> Duration {
    humantime::parse_duration(DEFAULT_DISK_TTL).expect("valid default")
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

fn default_freshness_window() -> Duration {
    humantime::parse_duration(DEFAULT_FRESHNESS_WINDOW).expect("valid default")
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            detail_batch_size: default_detail_batch_size(),
            batch_delay: default_batch_delay(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_ttl: default_memory_ttl(),
            disk_enabled: default_disk_cache_enabled(),
            disk_ttl: default_disk_ttl(),
            path: default_cache_path(),
            freshness_window: default_freshness_window(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    pub fn load_from_file(config_file: &str) -> Result<Self> {
        let config = if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            toml::from_str(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            default_config
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fetch.detail_batch_size < MIN_DETAIL_BATCH_SIZE
            || self.fetch.detail_batch_size > MAX_DETAIL_BATCH_SIZE
        {
            return Err(anyhow::anyhow!(
                "fetch.detail_batch_size must be between {} and {}, got {}",
                MIN_DETAIL_BATCH_SIZE,
                MAX_DETAIL_BATCH_SIZE,
                self.fetch.detail_batch_size
            ));
        }
        if self.upstream.base_url.is_empty() {
            return Err(anyhow::anyhow!("upstream.base_url must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fetch.detail_batch_size, 20);
        assert_eq!(config.cache.memory_ttl, Duration::from_secs(3600));
        assert_eq!(config.cache.disk_ttl, Duration::from_secs(86400));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.web.port, DEFAULT_PORT);
        assert_eq!(config.upstream.base_url, DEFAULT_UPSTREAM_BASE_URL);
    }

    #[test]
    fn test_partial_section_override() {
        let config: Config = toml::from_str(
            r#"
            [fetch]
            detail_batch_size = 50
            batch_delay = "500ms"

            [cache]
            memory_ttl = "30m"
            "#,
        )
        .unwrap();
        assert_eq!(config.fetch.detail_batch_size, 50);
        assert_eq!(config.fetch.batch_delay, Duration::from_millis(500));
        assert_eq!(config.cache.memory_ttl, Duration::from_secs(1800));
        // Untouched sections keep defaults
        assert_eq!(config.web.host, DEFAULT_HOST);
    }

    #[test]
    fn test_batch_size_bounds_rejected() {
        let config: Config = toml::from_str(
            r#"
            [fetch]
            detail_batch_size = 500
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
