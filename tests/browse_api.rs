//! Endpoint contract tests for the catalog proxy and browse API
//!
//! The catalog is seeded through the persistent cache file so no upstream
//! network access is involved; the failure-path test points the fetcher at
//! an unroutable upstream.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use pokedex_proxy::config::Config;
use pokedex_proxy::models::Pokemon;
use pokedex_proxy::services::{CatalogService, PokemonFetcher};
use pokedex_proxy::services::cache::CACHE_FILE_NAME;
use pokedex_proxy::utils::StandardHttpClient;
use pokedex_proxy::web::WebServer;

/// Nothing listens on port 9 (discard); connections fail immediately.
const UNROUTABLE_UPSTREAM: &str = "http://127.0.0.1:9/api/v2";

fn test_config(cache_dir: Option<&std::path::Path>) -> Config {
    let mut config = Config::default();
    config.upstream.base_url = UNROUTABLE_UPSTREAM.to_string();
    match cache_dir {
        Some(dir) => {
            config.cache.disk_enabled = true;
            config.cache.path = dir.to_path_buf();
        }
        None => config.cache.disk_enabled = false,
    }
    config
}

fn server_for(config: Config) -> TestServer {
    let client = Arc::new(StandardHttpClient::new(config.upstream.connect_timeout));
    let fetcher = PokemonFetcher::new(client, config.upstream.base_url.clone(), &config.fetch);
    let catalog = Arc::new(CatalogService::new(fetcher, &config.cache));
    let web_server = WebServer::new(config, catalog).expect("valid test config");
    TestServer::new(web_server.router()).expect("test server")
}

fn seed_catalog(dir: &std::path::Path, pokemon: &[Pokemon]) {
    let entry = json!({
        "timestamp": chrono::Utc::now(),
        "data": pokemon,
    });
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join(CACHE_FILE_NAME),
        serde_json::to_vec(&entry).unwrap(),
    )
    .unwrap();
}

fn mon(id: u32, types: &[&str]) -> Pokemon {
    Pokemon {
        id,
        name: format!("mon-{id}"),
        types: types.iter().map(|t| t.to_string()).collect(),
        image_url: format!("https://img.test/{id}.gif"),
    }
}

fn scenario_catalog() -> Vec<Pokemon> {
    vec![
        mon(1, &["grass"]),
        mon(2, &["grass", "poison"]),
        mon(3, &["fire"]),
    ]
}

#[tokio::test]
async fn get_pokemon_serves_catalog_with_provenance_headers() {
    let dir = tempfile::tempdir().unwrap();
    seed_catalog(dir.path(), &scenario_catalog());
    let server = server_for(test_config(Some(dir.path())));

    let response = server.get("/api/pokemon").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.headers()["x-pokemon-count"], "3");
    assert_eq!(response.headers()["x-cache-source"], "disk");
    assert!(response.headers().get("x-error").is_none());

    let body: Vec<Pokemon> = response.json();
    assert_eq!(body, scenario_catalog());

    // The collection is now held in memory; provenance reflects that.
    let second = server.get("/api/pokemon").await;
    assert_eq!(second.headers()["x-cache-source"], "memory");
}

#[tokio::test]
async fn get_pokemon_degrades_to_empty_array_on_upstream_failure() {
    let server = server_for(test_config(None));

    let response = server.get("/api/pokemon").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.headers()["x-pokemon-count"], "0");
    assert!(response.headers().get("x-error").is_some());

    let body: Vec<Pokemon> = response.json();
    assert!(body.is_empty());
}

#[tokio::test]
async fn browse_filters_sorts_and_reports_query() {
    let dir = tempfile::tempdir().unwrap();
    seed_catalog(dir.path(), &scenario_catalog());
    let server = server_for(test_config(Some(dir.path())));

    let response = server
        .get("/api/pokemon/browse")
        .add_query_param("type", "grass,poison")
        .await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["items"][0]["id"], 2);
    assert_eq!(body["items"][0]["matchingTypes"], json!(["grass", "poison"]));
    assert_eq!(body["items"][0]["slots"], json!([1, 2]));
    assert_eq!(body["query"], "type=grass,poison&page=1");
}

#[tokio::test]
async fn browse_without_filter_paginates_in_upstream_order() {
    let catalog: Vec<Pokemon> = (1..=30).map(|id| mon(id, &["normal"])).collect();
    let dir = tempfile::tempdir().unwrap();
    seed_catalog(dir.path(), &catalog);
    let server = server_for(test_config(Some(dir.path())));

    let response = server
        .get("/api/pokemon/browse")
        .add_query_param("page", "2")
        .await;
    let body: serde_json::Value = response.json();

    assert_eq!(body["totalCount"], 30);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["page"], 1); // 0-based internally
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(items[0]["id"], 25);
    // No filter active: no enrichment fields on the wire
    assert!(items[0].get("matchingTypes").is_none());
    assert_eq!(body["query"], "page=2");
}

#[tokio::test]
async fn browse_zero_match_resets_page() {
    let dir = tempfile::tempdir().unwrap();
    seed_catalog(dir.path(), &scenario_catalog());
    let server = server_for(test_config(Some(dir.path())));

    let response = server
        .get("/api/pokemon/browse")
        .add_query_param("type", "dragon")
        .add_query_param("page", "7")
        .await;
    let body: serde_json::Value = response.json();

    assert_eq!(body["totalCount"], 0);
    assert_eq!(body["totalPages"], 0);
    assert_eq!(body["page"], 0);
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["query"], "type=dragon&page=1");
}

#[tokio::test]
async fn health_endpoints_respond() {
    let server = server_for(test_config(None));

    let health = server.get("/health").await;
    assert_eq!(health.status_code(), 200);
    let body: serde_json::Value = health.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");

    let live = server.get("/live").await;
    assert_eq!(live.status_code(), 200);
}
