//! Web layer module
//!
//! This module provides the HTTP interface for the Pokedex Proxy
//! application. It follows clean architecture principles with thin handlers
//! that delegate to the service layer for business logic.
//!
//! # Architecture
//!
//! - **Handlers**: HTTP request handlers organized by domain
//! - **Responses**: Standardized response types and header helpers
//! - **OpenAPI**: Interactive API documentation at `/docs`
//!
//! Errors never surface as non-200 status on the catalog endpoint: upstream
//! failures degrade to an empty collection plus an error header so the
//! rendering layer only ever branches on "is the list empty".

use anyhow::Result;
use axum::{Router, routing::get};
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::{config::Config, services::CatalogService};

pub mod handlers;
pub mod openapi;
pub mod responses;

pub use responses::ApiResponse;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<CatalogService>,
    /// Application start time for uptime calculation
    pub start_time: DateTime<Utc>,
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config, catalog: Arc<CatalogService>) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let state = AppState {
            config,
            catalog,
            start_time: Utc::now(),
        };
        Ok(Self {
            app: Self::create_router(state),
            addr,
        })
    }

    fn create_router(state: AppState) -> Router {
        Router::new()
            // Health check endpoints
            .route("/health", get(handlers::health::health_check))
            .route("/live", get(handlers::health::liveness_check))
            // OpenAPI documentation
            .merge(Self::openapi_routes())
            // Catalog proxy endpoints
            .route("/api/pokemon", get(handlers::pokemon::get_pokemon))
            .route("/api/pokemon/browse", get(handlers::pokemon::browse_pokemon))
            // Middleware (applied in reverse order)
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            // Shared state
            .with_state(state)
    }

    /// OpenAPI documentation routes
    fn openapi_routes() -> Router<AppState> {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        Router::new().merge(
            SwaggerUi::new("/docs").url("/api/openapi.json", openapi::ApiDoc::openapi()),
        )
    }

    /// The assembled router, for tests and embedding
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        let (ready_tx, _ready_rx) = tokio::sync::oneshot::channel();
        self.serve_with_signal(ready_tx).await
    }

    /// Serve with a notification when the server is actually listening or
    /// fails to bind
    pub async fn serve_with_signal(
        self,
        ready_signal: tokio::sync::oneshot::Sender<Result<()>>,
    ) -> Result<()> {
        match tokio::net::TcpListener::bind(&self.addr).await {
            Ok(listener) => {
                // Signal that we're now actually listening on the port
                let _ = ready_signal.send(Ok(()));

                let shutdown_signal = async move {
                    #[cfg(unix)]
                    {
                        use tokio::signal::unix::{SignalKind, signal};
                        let mut sigterm = signal(SignalKind::terminate())
                            .expect("failed to install SIGTERM handler");
                        let mut sigint = signal(SignalKind::interrupt())
                            .expect("failed to install SIGINT handler");

                        tokio::select! {
                            _ = sigterm.recv() => {
                                tracing::info!("Received SIGTERM, shutting down gracefully");
                            }
                            _ = sigint.recv() => {
                                tracing::info!("Received SIGINT (Ctrl+C), shutting down gracefully");
                            }
                        }
                    }

                    #[cfg(not(unix))]
                    {
                        use tokio::signal;
                        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
                        tracing::info!("Received Ctrl+C, shutting down gracefully");
                    }
                };

                axum::serve(listener, self.app)
                    .with_graceful_shutdown(shutdown_signal)
                    .await?;
                Ok(())
            }
            Err(bind_error) => {
                let bind_err_msg = format!("Failed to bind to {}: {}", self.addr, bind_error);
                let _ = ready_signal.send(Err(anyhow::anyhow!("{}", bind_err_msg)));
                Err(anyhow::anyhow!("{}", bind_err_msg))
            }
        }
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}
