//! Pokemon catalog API handlers
//!
//! `/api/pokemon` proxies the whole materialized catalog; `/api/pokemon/browse`
//! applies the filter/sort/paginate pipeline server-side and returns one page.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::Pokemon,
    pipeline::{self, PageView, ViewState},
    web::{
        AppState,
        responses::{HEADER_CACHE_SOURCE, HEADER_ERROR, HEADER_POKEMON_COUNT, header_value},
    },
};

/// Get the full Pokemon catalog
///
/// Always responds 200 with a JSON array. An upstream failure yields an
/// empty array plus an error header — never a non-200 status.
#[utoipa::path(
    get,
    path = "/api/pokemon",
    tag = "pokemon",
    responses(
        (status = 200, description = "Full catalog; X-Pokemon-Count and X-Cache-Source carry item count and cache provenance", body = Vec<Pokemon>)
    )
)]
pub async fn get_pokemon(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.catalog.get_catalog().await;

    let mut headers = HeaderMap::new();
    headers.insert(
        HEADER_POKEMON_COUNT,
        header_value(&snapshot.pokemon.len().to_string()),
    );
    headers.insert(HEADER_CACHE_SOURCE, header_value(snapshot.source.as_str()));
    headers.insert(
        header::CACHE_CONTROL,
        header_value(&format!(
            "public, max-age={}",
            state.config.cache.freshness_window.as_secs()
        )),
    );
    if snapshot.fetch_failed {
        headers.insert(HEADER_ERROR, header_value("Failed to fetch Pokemon data"));
    }

    (StatusCode::OK, headers, Json(snapshot.pokemon.as_ref().clone()))
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct BrowseQuery {
    /// Comma-separated type names; selection order is significant
    #[serde(rename = "type")]
    pub type_filter: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
}

/// One browse page plus the canonical query string for the state, so a
/// client can reflect it into its URL bar without recomputing it.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResponse {
    #[serde(flatten)]
    pub view: PageView,
    pub query: String,
}

/// Browse the catalog with type filtering and pagination
#[utoipa::path(
    get,
    path = "/api/pokemon/browse",
    tag = "pokemon",
    params(BrowseQuery),
    responses(
        (status = 200, description = "One 24-item page of the filtered, sorted catalog", body = BrowseResponse)
    )
)]
pub async fn browse_pokemon(
    State(state): State<AppState>,
    Query(params): Query<BrowseQuery>,
) -> impl IntoResponse {
    let mut view_state =
        ViewState::from_query(params.type_filter.as_deref(), params.page.as_deref());

    let snapshot = state.catalog.get_catalog().await;
    let view = pipeline::apply(
        &snapshot.pokemon,
        &view_state.selected_types,
        view_state.page,
    );
    view_state.reconcile(view.total_pages);

    let mut headers = HeaderMap::new();
    headers.insert(HEADER_CACHE_SOURCE, header_value(snapshot.source.as_str()));
    if snapshot.fetch_failed {
        headers.insert(HEADER_ERROR, header_value("Failed to fetch Pokemon data"));
    }

    let query = view_state.to_query_string();
    (StatusCode::OK, headers, Json(BrowseResponse { view, query }))
}
