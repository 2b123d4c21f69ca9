//! Price records served to the dashboard

use chrono::DateTime;
use serde::Serialize;

/// Live market metadata for one asset
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSnapshot {
    /// Upstream coin id (e.g., "bitcoin")
    pub id: String,

    /// Display name (e.g., "Bitcoin")
    pub name: String,

    /// Ticker symbol (e.g., "btc")
    pub symbol: String,

    /// Current price in USD
    pub price: f64,

    /// Percentage price change over the last 24 hours
    pub price_change_24h: Option<f64>,

    /// Market capitalization in USD
    pub market_cap: f64,

    /// Icon image URL
    pub image: String,
}

/// Trailing 7-day daily price samples for one asset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalSeries {
    /// (timestamp in epoch milliseconds, USD price), oldest first
    pub samples: Vec<(i64, f64)>,
}

/// A single point on the price chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    /// Short `M/D/YYYY` date of the sample (UTC)
    pub date: String,
    pub price: f64,
}

impl PricePoint {
    /// Build a point from a raw upstream sample
    pub fn from_sample(timestamp_ms: i64, price: f64) -> Self {
        Self {
            date: format_sample_date(timestamp_ms),
            price,
        }
    }
}

/// Snapshot plus price history, the unit cached and returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedRecord {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub price_change_24h: Option<f64>,
    pub market_cap: f64,
    pub image: String,
    pub price_history: Vec<PricePoint>,
}

impl CombinedRecord {
    /// Merge one asset's snapshot with its history.
    ///
    /// The caller is responsible for passing the history of the same asset;
    /// no identifier check is made here.
    pub fn merge(snapshot: CurrentSnapshot, history: HistoricalSeries) -> Self {
        let price_history = history
            .samples
            .into_iter()
            .map(|(ts, price)| PricePoint::from_sample(ts, price))
            .collect();

        Self {
            id: snapshot.id,
            name: snapshot.name,
            symbol: snapshot.symbol,
            price: snapshot.price,
            price_change_24h: snapshot.price_change_24h,
            market_cap: snapshot.market_cap,
            image: snapshot.image,
            price_history,
        }
    }
}

/// Render an epoch-millisecond timestamp as an en-US short date, e.g. `3/9/2024`
pub fn format_sample_date(timestamp_ms: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(dt) => dt.format("%-m/%-d/%Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}
