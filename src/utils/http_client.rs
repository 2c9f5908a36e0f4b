use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{AppError, AppResult};

/// HTTP client trait for fetching JSON documents
///
/// The seam exists so services depending on upstream data can be exercised
/// without network access.
#[async_trait]
pub trait JsonHttpClient: Send + Sync {
    /// Fetch URL and deserialize the JSON response body
    async fn fetch_json_value(&self, url: &str) -> AppResult<serde_json::Value>;
}

/// Typed convenience wrapper over [`JsonHttpClient::fetch_json_value`]
pub async fn fetch_json<T, C>(client: &C, url: &str) -> AppResult<T>
where
    T: DeserializeOwned,
    C: JsonHttpClient + ?Sized,
{
    let value = client.fetch_json_value(url).await?;
    serde_json::from_value(value).map_err(|e| {
        AppError::external_service("upstream", format!("Failed to decode JSON from {url}: {e}"))
    })
}

/// Default implementation of JsonHttpClient using reqwest
pub struct StandardHttpClient {
    client: Client,
}

impl StandardHttpClient {
    /// Create new HTTP client with only a connection timeout (no total
    /// request timeout) and a standard user agent.
    pub fn new(connect_timeout: Duration) -> Self {
        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for StandardHttpClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

#[async_trait]
impl JsonHttpClient for StandardHttpClient {
    async fn fetch_json_value(&self, url: &str) -> AppResult<serde_json::Value> {
        debug!("Fetching JSON content from: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::ExternalService {
                service: "http_client".to_string(),
                message: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(AppError::Source(crate::errors::SourceError::Http {
                status: response.status().as_u16(),
                message: format!(
                    "{} - URL: {}",
                    response.status().canonical_reason().unwrap_or("Unknown"),
                    url
                ),
            }));
        }

        let value = response.json::<serde_json::Value>().await.map_err(|e| {
            AppError::external_service("http_client", format!("Failed to read response: {e}"))
        })?;

        debug!("Successfully fetched JSON content from: {}", url);
        Ok(value)
    }
}
