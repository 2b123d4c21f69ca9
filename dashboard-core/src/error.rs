//! Error types for the dashboard

use thiserror::Error;

/// Dashboard-wide error type
#[derive(Error, Debug, Clone)]
pub enum DashboardError {
    /// Upstream answered 429 and the retry budget is spent
    #[error("Request failed with status code 429")]
    RateLimited {
        /// Seconds from the upstream `Retry-After` header, if it sent one
        retry_after_secs: Option<u64>,
    },

    #[error("Request failed with status code {status}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    pub fn rate_limited(retry_after_secs: Option<u64>) -> Self {
        DashboardError::RateLimited { retry_after_secs }
    }

    pub fn http(status: u16, body: impl Into<String>) -> Self {
        DashboardError::Http {
            status,
            body: body.into(),
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        DashboardError::Network(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        DashboardError::Parse(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        DashboardError::Internal(msg.into())
    }

    /// Whether the upstream signalled rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, DashboardError::RateLimited { .. })
    }

    /// HTTP status reported by the upstream, if the failure carried one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            DashboardError::RateLimited { .. } => Some(429),
            DashboardError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of a failed upstream request, kept for logging only
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            DashboardError::Http { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
