//! Price data endpoint

use axum::{
    extract::State,
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use dashboard_core::DashboardError;
use tracing::error;

use super::{rate_limit::rate_limit, ErrorResponse};
use crate::AppState;

/// Message returned when CoinGecko keeps rate limiting us
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

/// Message returned for any other upstream failure
pub const FETCH_ERROR_MESSAGE: &str = "An error occurred while fetching data";

/// Create data routes, guarded by the per-client rate limiter
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/data", get(get_data))
        .route_layer(middleware::from_fn_with_state(state, rate_limit))
}

/// Combined price records for every tracked asset
async fn get_data(State(state): State<AppState>) -> Response {
    match state.price_service.get_combined_records().await {
        Ok(records) => (StatusCode::OK, Json(records.as_slice())).into_response(),
        Err(e) => upstream_error_response(e),
    }
}

fn upstream_error_response(err: DashboardError) -> Response {
    match err {
        DashboardError::RateLimited { retry_after_secs } => {
            let body = ErrorResponse {
                retry_after_secs,
                ..ErrorResponse::new(RATE_LIMIT_MESSAGE)
            };
            match retry_after_secs {
                Some(secs) => (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, secs.to_string())],
                    Json(body),
                )
                    .into_response(),
                None => (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response(),
            }
        }
        other => {
            error!("Failed to fetch price data: {}", other);
            let body = ErrorResponse {
                details: Some(other.to_string()),
                ..ErrorResponse::new(FETCH_ERROR_MESSAGE)
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
