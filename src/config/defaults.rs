/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

// Upstream API defaults
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_CONNECT_TIMEOUT: &str = "10s";

// Fetch defaults
pub const DEFAULT_DETAIL_BATCH_SIZE: usize = 20;
pub const DEFAULT_BATCH_DELAY: &str = "200ms";

// Batch sizes outside 1..=100 either hammer the upstream API or degenerate
// into per-item fetching.
pub const MIN_DETAIL_BATCH_SIZE: usize = 1;
pub const MAX_DETAIL_BATCH_SIZE: usize = 100;

// Cache defaults
pub const DEFAULT_MEMORY_TTL: &str = "1h";
pub const DEFAULT_DISK_TTL: &str = "24h";
pub const DEFAULT_DISK_CACHE_ENABLED: bool = true;
pub const DEFAULT_CACHE_PATH: &str = "./data/cache";
pub const DEFAULT_FRESHNESS_WINDOW: &str = "1h";
