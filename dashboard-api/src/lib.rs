//! Crypto Dashboard API
//!
//! HTTP server that proxies CoinGecko price data for the dashboard frontend,
//! with a short-lived cache in front of the upstream API.

pub mod config;
pub mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use dashboard_coingecko::PriceSource;
use dashboard_services::{ClientRateLimiter, PriceAggregator, PriceCache, PriceService};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub use config::{Config, ConfigError};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub price_service: Arc<PriceService>,
    pub rate_limiter: Arc<ClientRateLimiter>,
}

impl AppState {
    /// Wire the services around `source` using the limits in `config`
    pub fn new(config: &Config, source: Arc<dyn PriceSource>) -> Self {
        Self::with_cache(config, source, Arc::new(PriceCache::new(config.cache_ttl)))
    }

    /// Same as [`AppState::new`] with a caller-provided cache
    pub fn with_cache(config: &Config, source: Arc<dyn PriceSource>, cache: Arc<PriceCache>) -> Self {
        let price_service = PriceService::new(cache, PriceAggregator::new(source));
        let rate_limiter = ClientRateLimiter::new(config.rate_limit_max_requests, config.rate_limit_window);

        Self {
            price_service: Arc::new(price_service),
            rate_limiter: Arc::new(rate_limiter),
        }
    }
}

/// Build the application router with CORS and request tracing
pub fn build_router(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([config.cors_origin.clone()]))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(routes::data_routes(state.clone()))
        .nest("/api", routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
