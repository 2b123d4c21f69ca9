//! CoinGecko integration for the Crypto Dashboard backend
//!
//! Provides a client for the public CoinGecko v3 API, which serves coin
//! metadata and market charts without authentication. Requests that come back
//! rate limited (HTTP 429) are retried with exponential backoff.

pub mod client;
pub mod retry;
pub mod source;
pub mod types;

pub use client::{CoinGeckoClient, COINGECKO_API_BASE};
pub use retry::RetryPolicy;
pub use source::PriceSource;
pub use types::{CoinDetail, MarketChart};
