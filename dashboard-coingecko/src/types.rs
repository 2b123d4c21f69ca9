//! CoinGecko API response types
//!
//! Only the fields the dashboard reads are modelled; serde ignores the rest.

use dashboard_core::{CurrentSnapshot, HistoricalSeries};
use serde::Deserialize;

/// Response of `GET /coins/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub image: CoinImage,
    pub market_data: CoinMarketData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinImage {
    pub small: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinMarketData {
    pub current_price: UsdAmount,
    pub price_change_percentage_24h: Option<f64>,
    pub market_cap: UsdAmount,
}

/// A per-currency amount map, of which only USD is requested
#[derive(Debug, Clone, Deserialize)]
pub struct UsdAmount {
    pub usd: f64,
}

/// Response of `GET /coins/{id}/market_chart`
#[derive(Debug, Clone, Deserialize)]
pub struct MarketChart {
    /// `[timestamp_ms, price]` pairs
    pub prices: Vec<(f64, f64)>,
}

impl From<CoinDetail> for CurrentSnapshot {
    fn from(detail: CoinDetail) -> Self {
        CurrentSnapshot {
            id: detail.id,
            name: detail.name,
            symbol: detail.symbol,
            price: detail.market_data.current_price.usd,
            price_change_24h: detail.market_data.price_change_percentage_24h,
            market_cap: detail.market_data.market_cap.usd,
            image: detail.image.small,
        }
    }
}

impl From<MarketChart> for HistoricalSeries {
    fn from(chart: MarketChart) -> Self {
        HistoricalSeries {
            samples: chart
                .prices
                .into_iter()
                .map(|(ts, price)| (ts as i64, price))
                .collect(),
        }
    }
}
