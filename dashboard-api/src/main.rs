//! Crypto Dashboard API Server
//!
//! Serves cached CoinGecko price data for the dashboard frontend.

use dashboard_api::{build_router, AppState, Config};
use dashboard_coingecko::CoinGeckoClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if the file doesn't exist
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,dashboard_api=debug")),
        )
        .init();

    info!("Starting Crypto Dashboard API");

    let config = Config::from_env()?;

    let client = CoinGeckoClient::with_base_url(&config.api_base, config.upstream_timeout)?;
    info!("Using CoinGecko API at {}", config.api_base);

    let state = AppState::new(&config, Arc::new(client));
    info!(
        "Price cache TTL {:?}, rate limit {} requests per {:?}",
        config.cache_ttl, config.rate_limit_max_requests, config.rate_limit_window
    );

    let app = build_router(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server is running on port {}", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
