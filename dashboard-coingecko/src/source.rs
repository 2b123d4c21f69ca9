//! Upstream price source abstraction

use async_trait::async_trait;
use dashboard_core::{Asset, CurrentSnapshot, DashboardResult, HistoricalSeries};

/// Provider of per-asset market data.
///
/// Implementations are expected to have already applied their retry policy:
/// an error returned here is final for the current aggregation.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Live price, 24h change, market cap and icon for `asset`
    async fn fetch_current(&self, asset: Asset) -> DashboardResult<CurrentSnapshot>;

    /// Trailing 7-day daily USD price series for `asset`
    async fn fetch_history(&self, asset: Asset) -> DashboardResult<HistoricalSeries>;
}
