//! Test doubles for the service layer

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::{AppError, AppResult};
use crate::utils::http_client::JsonHttpClient;

/// In-memory stand-in for the upstream API, keyed by exact request URL.
/// URLs without a registered response produce an external-service error.
pub struct FakeApi {
    routes: HashMap<String, serde_json::Value>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    pub fn with_route(mut self, url: &str, body: serde_json::Value) -> Self {
        self.routes.insert(url.to_string(), body);
        self
    }
}

#[async_trait]
impl JsonHttpClient for FakeApi {
    async fn fetch_json_value(&self, url: &str) -> AppResult<serde_json::Value> {
        self.routes
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::external_service("fake_api", format!("no route for {url}")))
    }
}

/// Build an upstream list response body
pub fn list_body(count: u64, refs: &[(u32, &str)]) -> serde_json::Value {
    serde_json::json!({
        "count": count,
        "next": null,
        "previous": null,
        "results": refs
            .iter()
            .map(|(id, name)| serde_json::json!({
                "name": name,
                "url": format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
            }))
            .collect::<Vec<_>>(),
    })
}

/// Build an upstream detail response body
pub fn detail_body(id: u32, name: &str, types: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "types": types
            .iter()
            .enumerate()
            .map(|(i, t)| serde_json::json!({
                "slot": i + 1,
                "type": {"name": t, "url": format!("https://pokeapi.co/api/v2/type/{i}/")},
            }))
            .collect::<Vec<_>>(),
        "sprites": {
            "front_default": format!("https://img.test/{id}.png"),
            "other": {"showdown": {"front_default": format!("https://img.test/{id}.gif")}},
        },
    })
}
