//! API route definitions

mod data;
mod health;
mod rate_limit;

use axum::Router;
use serde::Serialize;

use crate::AppState;

/// Error response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Seconds the client should wait before retrying, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            retry_after_secs: None,
        }
    }
}

/// Routes served under `/api`
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(data::routes(state))
        .merge(health::routes())
}

/// Data routes served at the root, e.g. `GET /data`
pub fn data_routes(state: AppState) -> Router<AppState> {
    data::routes(state)
}
