//! Health check endpoints

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    cache: CacheHealth,
    rate_limiter: RateLimiterHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CacheHealth {
    populated: bool,
    age_secs: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RateLimiterHealth {
    total_requests: u64,
    rejected_requests: u64,
}

/// Health check handler
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = state.price_service.cache().stats();
    let limiter = state.rate_limiter.stats();

    Json(HealthResponse {
        status: "ok",
        cache: CacheHealth {
            populated: cache.populated,
            age_secs: cache.age.map(|age| age.as_secs()),
        },
        rate_limiter: RateLimiterHealth {
            total_requests: limiter.total_requests,
            rejected_requests: limiter.rejected_requests,
        },
    })
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}
