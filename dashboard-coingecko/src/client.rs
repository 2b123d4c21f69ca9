//! CoinGecko API client
//!
//! Fetches coin metadata and 7-day market charts from the public
//! CoinGecko v3 API. Every request goes through [`RetryPolicy`] so that
//! 429 responses are retried with exponential backoff.

use async_trait::async_trait;
use dashboard_core::{Asset, CurrentSnapshot, DashboardError, DashboardResult, HistoricalSeries};
use reqwest::{header::RETRY_AFTER, Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::retry::RetryPolicy;
use crate::source::PriceSource;
use crate::types::{CoinDetail, MarketChart};

/// Base URL for the CoinGecko coins API
pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3/coins";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CoinGecko API client
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl CoinGeckoClient {
    /// Create a client against the public API with default timeout and retry policy
    pub fn new() -> DashboardResult<Self> {
        Self::with_base_url(COINGECKO_API_BASE, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client against a custom base URL (e.g., a proxy or a test server)
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> DashboardResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("CryptoDashboard/1.0")
            .build()
            .map_err(|e| DashboardError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry: RetryPolicy::default(),
        })
    }

    /// URL for live market data, excluding localization, tickers, community and developer data
    pub fn current_data_url(&self, asset: Asset) -> String {
        format!(
            "{}/{}?localization=false&tickers=false&market_data=true&community_data=false&developer_data=false",
            self.base_url,
            asset.coin_id()
        )
    }

    /// URL for the 7-day daily USD price chart
    pub fn market_chart_url(&self, asset: Asset) -> String {
        format!(
            "{}/{}/market_chart?vs_currency=usd&days=7&interval=daily",
            self.base_url,
            asset.coin_id()
        )
    }

    /// GET `url` and decode the JSON body, retrying on HTTP 429
    pub async fn fetch_with_retry<T: DeserializeOwned>(&self, url: &str) -> DashboardResult<T> {
        self.retry.run(url, move || self.get_json(url)).await
    }

    /// Single GET without retry
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> DashboardResult<T> {
        debug!("[CoinGecko] GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DashboardError::network(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            return Err(DashboardError::rate_limited(retry_after_secs));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("[CoinGecko] {} returned {}: {}", url, status, body);
            return Err(DashboardError::http(status.as_u16(), body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DashboardError::parse(e.to_string()))
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    #[instrument(skip(self))]
    async fn fetch_current(&self, asset: Asset) -> DashboardResult<CurrentSnapshot> {
        let url = self.current_data_url(asset);
        let detail: CoinDetail = self.fetch_with_retry(&url).await?;
        Ok(detail.into())
    }

    #[instrument(skip(self))]
    async fn fetch_history(&self, asset: Asset) -> DashboardResult<HistoricalSeries> {
        let url = self.market_chart_url(asset);
        let chart: MarketChart = self.fetch_with_retry(&url).await?;
        Ok(chart.into())
    }
}
