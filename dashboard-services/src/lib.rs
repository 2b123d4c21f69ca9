//! Business logic services for the Crypto Dashboard backend
//!
//! This crate provides the service layer that aggregates CoinGecko data into
//! combined per-asset records, caches them, and guards the public endpoint.

pub mod aggregator;
pub mod price_cache;
pub mod price_service;
pub mod rate_limiter;

pub use aggregator::{merge_positional, PriceAggregator};
pub use price_cache::{CacheStats, Clock, ManualClock, PriceCache, SystemClock, CACHE_TTL_SECS};
pub use price_service::PriceService;
pub use rate_limiter::{ClientRateLimiter, RateLimiterStats};
