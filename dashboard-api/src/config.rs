//! Server configuration loaded from environment variables

use axum::http::HeaderValue;
use dashboard_coingecko::client::{COINGECKO_API_BASE, DEFAULT_TIMEOUT_SECS};
use dashboard_services::{
    rate_limiter::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_SECS},
    CACHE_TTL_SECS,
};
use std::{env, str::FromStr, time::Duration};

/// Default listening port
pub const DEFAULT_PORT: u16 = 5000;

/// Origin of the dashboard frontend allowed by CORS
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Runtime configuration for the API server
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// The only origin allowed to call the API from a browser
    pub cors_origin: HeaderValue,
    /// CoinGecko coins endpoint base URL
    pub api_base: String,
    pub cache_ttl: Duration,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window: Duration,
    pub upstream_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origin: HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
            api_base: COINGECKO_API_BASE.to_string(),
            cache_ttl: Duration::from_secs(CACHE_TTL_SECS),
            rate_limit_max_requests: DEFAULT_MAX_REQUESTS,
            rate_limit_window: Duration::from_secs(DEFAULT_WINDOW_SECS),
            upstream_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Reads (all optional):
    /// - PORT
    /// - CORS_ORIGIN
    /// - COINGECKO_API_BASE
    /// - CACHE_TTL_SECS
    /// - RATE_LIMIT_MAX_REQUESTS
    /// - RATE_LIMIT_WINDOW_SECS
    /// - UPSTREAM_TIMEOUT_SECS
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cors_origin = match lookup("CORS_ORIGIN") {
            Some(origin) => HeaderValue::from_str(&origin).map_err(|_| ConfigError::Invalid {
                key: "CORS_ORIGIN",
                value: origin,
            })?,
            None => defaults.cors_origin,
        };

        Ok(Self {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            cors_origin,
            api_base: lookup("COINGECKO_API_BASE").unwrap_or(defaults.api_base),
            cache_ttl: secs_or(&lookup, "CACHE_TTL_SECS", defaults.cache_ttl)?,
            rate_limit_max_requests: parse_or(
                &lookup,
                "RATE_LIMIT_MAX_REQUESTS",
                defaults.rate_limit_max_requests,
            )?,
            rate_limit_window: secs_or(&lookup, "RATE_LIMIT_WINDOW_SECS", defaults.rate_limit_window)?,
            upstream_timeout: secs_or(&lookup, "UPSTREAM_TIMEOUT_SECS", defaults.upstream_timeout)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn secs_or<F>(lookup: &F, key: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    parse_or(lookup, key, default.as_secs()).map(Duration::from_secs)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
