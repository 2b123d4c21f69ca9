//! Per-client rate limiting middleware

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use super::ErrorResponse;
use crate::AppState;

/// Message returned when a client exceeds its request budget
pub const TOO_MANY_REQUESTS_MESSAGE: &str = "Too many requests, please try again later.";

/// Reject requests from clients that exhausted their window budget
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    // Requests without connection info (in-process callers) share one bucket
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    match state.rate_limiter.check(client).await {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            let body = ErrorResponse {
                retry_after_secs: Some(secs),
                ..ErrorResponse::new(TOO_MANY_REQUESTS_MESSAGE)
            };
            (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, secs.to_string())],
                Json(body),
            )
                .into_response()
        }
    }
}
