//! Upstream catalog fetching
//!
//! Retrieves the full reference list, then resolves detail records in
//! bounded batches. Requests within a batch run concurrently and are joined
//! before the next batch starts; a failed item becomes a placeholder record
//! and a wholly failed batch is skipped. The steady-state path never raises
//! past this boundary — only the initial list fetch can propagate a hard
//! failure.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::FetchConfig;
use crate::errors::{AppResult, SourceError};
use crate::models::{Pokemon, PokemonDetailResponse, PokemonListResponse, PokemonRef};
use crate::utils::http_client::{JsonHttpClient, fetch_json};
use crate::utils::url::UrlUtils;

pub struct PokemonFetcher {
    client: Arc<dyn JsonHttpClient>,
    base_url: String,
    batch_size: usize,
    batch_delay: Duration,
}

impl PokemonFetcher {
    pub fn new(client: Arc<dyn JsonHttpClient>, base_url: String, fetch: &FetchConfig) -> Self {
        Self {
            client,
            base_url,
            batch_size: fetch.detail_batch_size,
            batch_delay: fetch.batch_delay,
        }
    }

    /// Fetch the whole catalog.
    ///
    /// The returned sequence may be shorter than the server-reported count
    /// when batches were skipped; a list-fetch failure propagates and the
    /// caller treats the collection as empty.
    pub async fn fetch_all(&self) -> AppResult<Vec<Pokemon>> {
        // The server-reported total drives the single full list request.
        let probe = self.fetch_list(1, 0).await?;
        let total = probe.count;
        if total == 0 {
            return Ok(Vec::new());
        }

        let list = self.fetch_list(total, 0).await?;
        info!("Fetched reference list: {} entries", list.results.len());

        let mut catalog = Vec::with_capacity(list.results.len());
        let mut processed = 0usize;
        let total_refs = list.results.len();
        let chunks: Vec<&[PokemonRef]> = list.results.chunks(self.batch_size).collect();
        let chunk_count = chunks.len();

        for (index, chunk) in chunks.into_iter().enumerate() {
            match self.fetch_batch(chunk).await {
                Ok(batch) => {
                    processed += chunk.len();
                    catalog.extend(batch);
                    info!(
                        "Processed {}/{} Pokemon ({}%)",
                        processed,
                        total_refs,
                        processed * 100 / total_refs
                    );
                }
                Err(e) => {
                    // Accepted data loss: keep partial results and move on.
                    warn!(
                        "Skipping batch {}/{} ({} entries): {}",
                        index + 1,
                        chunk_count,
                        chunk.len(),
                        e
                    );
                }
            }

            if index + 1 < chunk_count && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        Ok(catalog)
    }

    async fn fetch_list(&self, limit: u64, offset: u64) -> AppResult<PokemonListResponse> {
        let url = format!(
            "{}?limit={}&offset={}",
            UrlUtils::join(&self.base_url, "pokemon"),
            limit,
            offset
        );
        fetch_json(self.client.as_ref(), &url).await
    }

    /// Resolve one batch of detail records concurrently.
    ///
    /// A failed item is substituted with a placeholder; the batch as a whole
    /// fails only when every request in it failed.
    async fn fetch_batch(&self, refs: &[PokemonRef]) -> Result<Vec<Pokemon>, SourceError> {
        let outcomes = join_all(refs.iter().map(|r| self.fetch_detail(r))).await;

        if !outcomes.is_empty() && outcomes.iter().all(|o| o.is_err()) {
            return Err(SourceError::parse(format!(
                "all {} detail requests in batch failed",
                refs.len()
            )));
        }

        Ok(outcomes
            .into_iter()
            .zip(refs)
            .map(|(outcome, r)| match outcome {
                Ok(pokemon) => pokemon,
                Err(e) => {
                    let id = UrlUtils::extract_pokemon_id(&r.url);
                    debug!("Substituting placeholder for {} (id {}): {}", r.name, id, e);
                    Pokemon::placeholder(id, r.name.clone())
                }
            })
            .collect())
    }

    async fn fetch_detail(&self, reference: &PokemonRef) -> AppResult<Pokemon> {
        let id = UrlUtils::extract_pokemon_id(&reference.url);
        let url = UrlUtils::join(&self.base_url, &format!("pokemon/{id}"));
        let detail: PokemonDetailResponse = fetch_json(self.client.as_ref(), &url).await?;
        Ok(Pokemon::from(detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{FakeApi, detail_body, list_body};

    const BASE: &str = "https://api.test/v2";

    fn fetch_config() -> FetchConfig {
        FetchConfig {
            detail_batch_size: 2,
            batch_delay: Duration::ZERO,
        }
    }

    fn fetcher(api: FakeApi) -> PokemonFetcher {
        PokemonFetcher::new(Arc::new(api), BASE.to_string(), &fetch_config())
    }

    fn three_mon_api() -> FakeApi {
        let refs = [(1, "bulbasaur"), (2, "ivysaur"), (3, "charmander")];
        FakeApi::new()
            .with_route(
                &format!("{BASE}/pokemon?limit=1&offset=0"),
                list_body(3, &refs[..1]),
            )
            .with_route(
                &format!("{BASE}/pokemon?limit=3&offset=0"),
                list_body(3, &refs),
            )
            .with_route(&format!("{BASE}/pokemon/1"), detail_body(1, "bulbasaur", &["grass", "poison"]))
            .with_route(&format!("{BASE}/pokemon/2"), detail_body(2, "ivysaur", &["grass", "poison"]))
            .with_route(&format!("{BASE}/pokemon/3"), detail_body(3, "charmander", &["fire"]))
    }

    #[tokio::test]
    async fn test_fetch_all_resolves_details_in_order() {
        let catalog = fetcher(three_mon_api()).fetch_all().await.unwrap();
        let ids: Vec<u32> = catalog.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog[0].types, vec!["grass", "poison"]);
        assert_eq!(catalog[0].image_url, "https://img.test/1.gif");
    }

    #[tokio::test]
    async fn test_failed_detail_becomes_placeholder() {
        let refs = [(1, "bulbasaur"), (2, "ivysaur")];
        let api = FakeApi::new()
            .with_route(
                &format!("{BASE}/pokemon?limit=1&offset=0"),
                list_body(2, &refs[..1]),
            )
            .with_route(
                &format!("{BASE}/pokemon?limit=2&offset=0"),
                list_body(2, &refs),
            )
            .with_route(&format!("{BASE}/pokemon/1"), detail_body(1, "bulbasaur", &["grass"]));
        // No route for /pokemon/2: that item fails, the batch survives.

        let catalog = fetcher(api).fetch_all().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1], Pokemon::placeholder(2, "ivysaur"));
    }

    #[tokio::test]
    async fn test_wholly_failed_batch_is_skipped() {
        let refs = [(1, "bulbasaur"), (2, "ivysaur"), (3, "charmander")];
        // Batch size 2: batch [1,2] has no detail routes at all and is
        // skipped; batch [3] resolves.
        let api = FakeApi::new()
            .with_route(
                &format!("{BASE}/pokemon?limit=1&offset=0"),
                list_body(3, &refs[..1]),
            )
            .with_route(
                &format!("{BASE}/pokemon?limit=3&offset=0"),
                list_body(3, &refs),
            )
            .with_route(&format!("{BASE}/pokemon/3"), detail_body(3, "charmander", &["fire"]));

        let catalog = fetcher(api).fetch_all().await.unwrap();
        let ids: Vec<u32> = catalog.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[tokio::test]
    async fn test_malformed_reference_url_yields_id_zero_placeholder() {
        let api = FakeApi::new()
            .with_route(
                &format!("{BASE}/pokemon?limit=1&offset=0"),
                list_body(2, &[(1, "bulbasaur")]),
            )
            .with_route(
                &format!("{BASE}/pokemon?limit=2&offset=0"),
                serde_json::json!({
                    "count": 2,
                    "next": null,
                    "previous": null,
                    "results": [
                        {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                        {"name": "oddity", "url": "https://pokeapi.co/api/v2/pokemon/not-a-number/"},
                    ],
                }),
            )
            .with_route(&format!("{BASE}/pokemon/1"), detail_body(1, "bulbasaur", &["grass"]));
        // id 0 resolves nowhere, so the malformed entry lands as a placeholder.

        let catalog = fetcher(api).fetch_all().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1], Pokemon::placeholder(0, "oddity"));
    }

    #[tokio::test]
    async fn test_list_fetch_failure_propagates() {
        let api = FakeApi::new();
        assert!(fetcher(api).fetch_all().await.is_err());
    }

    #[tokio::test]
    async fn test_empty_upstream_yields_empty_catalog() {
        let api = FakeApi::new().with_route(
            &format!("{BASE}/pokemon?limit=1&offset=0"),
            list_body(0, &[]),
        );
        let catalog = fetcher(api).fetch_all().await.unwrap();
        assert!(catalog.is_empty());
    }
}
