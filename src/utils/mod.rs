//! Utility modules for the pokedex-proxy application
//!
//! This module contains reusable utilities that can be used
//! across different parts of the system.

pub mod http_client;
pub mod url;

// Re-export commonly used types for convenience
pub use http_client::{JsonHttpClient, StandardHttpClient};
pub use url::UrlUtils;
