use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex_proxy::{
    config::Config,
    services::{CatalogService, PokemonFetcher},
    utils::StandardHttpClient,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "pokedex-proxy")]
#[command(about = "A caching catalog proxy for PokeAPI with type filtering and pagination")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("pokedex_proxy={},tower_http=trace", cli.log_level)
    } else {
        format!("pokedex_proxy={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pokedex Proxy v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from specified file
    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    info!("Using upstream API: {}", config.upstream.base_url);

    let client = Arc::new(StandardHttpClient::new(config.upstream.connect_timeout));
    let fetcher = PokemonFetcher::new(client, config.upstream.base_url.clone(), &config.fetch);
    let catalog = Arc::new(CatalogService::new(fetcher, &config.cache));
    info!("Catalog service initialized");

    let web_server = WebServer::new(config, Arc::clone(&catalog))?;
    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );

    // Create a channel to signal when the server is ready or fails to bind
    let (server_ready_tx, server_ready_rx) = tokio::sync::oneshot::channel();

    // Start the web server in a separate task
    let server_handle = tokio::spawn(async move {
        // This will signal immediately when bind succeeds/fails, then block until shutdown
        if let Err(e) = web_server.serve_with_signal(server_ready_tx).await {
            tracing::error!("Web server failed: {}", e);
        }
    });

    // Wait for the server bind result (success or failure)
    match server_ready_rx.await {
        Ok(Ok(())) => {
            info!("Web server is now listening, warming catalog cache...");
        }
        Ok(Err(bind_error)) => {
            tracing::error!("Failed to bind web server: {}", bind_error);
            return Err(bind_error);
        }
        Err(_) => {
            tracing::error!("Web server task completed without signaling");
            return Err(anyhow::anyhow!("Web server failed to start"));
        }
    }

    // Warm the catalog in the background so the first browser hit is served
    // from cache. A warm-up failure is not fatal: requests retry the fetch.
    tokio::spawn(async move {
        let snapshot = catalog.get_catalog().await;
        if snapshot.fetch_failed {
            tracing::warn!("Catalog warm-up failed; requests will retry the fetch");
        } else {
            info!(
                "Catalog warm-up complete: {} entries ({})",
                snapshot.pokemon.len(),
                snapshot.source.as_str()
            );
        }
    });

    // Wait for the server to complete (this will block until shutdown)
    server_handle.await?;

    Ok(())
}
