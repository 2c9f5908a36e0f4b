//! Health check HTTP handlers

use axum::{extract::State, response::IntoResponse};

use crate::web::{
    AppState,
    responses::{HealthResponse, ok},
};

/// Health check endpoint
///
/// There are no hard dependencies to probe: the upstream API being down
/// degrades responses rather than failing them, so a running process is a
/// healthy process.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = chrono::Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds();
    ok(HealthResponse::healthy(uptime))
}

/// Liveness probe endpoint
pub async fn liveness_check() -> impl IntoResponse {
    "OK"
}
