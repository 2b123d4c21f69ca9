//! Price Aggregator
//!
//! Fans out one current-data and one history request per tracked asset,
//! waits for all of them, and zips the two result lists into combined
//! records.
//!
//! Both request lists are built from the same asset slice, so index `i` of
//! each response list belongs to the same asset. The merge relies on that
//! ordering instead of matching ids: the current-data id comes from the
//! upstream response while the chart response carries no id at all.

use dashboard_coingecko::PriceSource;
use dashboard_core::{
    Asset, CombinedRecord, CurrentSnapshot, DashboardResult, HistoricalSeries, TRACKED_ASSETS,
};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info};

/// Builds combined records for a fixed, ordered list of assets
pub struct PriceAggregator {
    source: Arc<dyn PriceSource>,
    assets: Vec<Asset>,
}

impl PriceAggregator {
    /// Aggregator over the default tracked assets
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self {
            source,
            assets: TRACKED_ASSETS.to_vec(),
        }
    }

    /// Fetch and merge data for every asset.
    ///
    /// All-or-nothing: the first fetch that fails (after its own retries)
    /// fails the whole call, and the fetches still in flight are dropped.
    pub async fn build_combined_records(&self) -> DashboardResult<Vec<CombinedRecord>> {
        debug!(
            "Aggregating {} assets ({} upstream requests)",
            self.assets.len(),
            self.assets.len() * 2
        );

        let current = try_join_all(self.assets.iter().map(|&asset| self.source.fetch_current(asset)));
        let history = try_join_all(self.assets.iter().map(|&asset| self.source.fetch_history(asset)));

        let (current, history) = futures::try_join!(current, history)?;

        let records = merge_positional(current, history);
        info!("Aggregated {} combined records", records.len());
        Ok(records)
    }
}

/// Pair the i-th snapshot with the i-th history series
pub fn merge_positional(
    current: Vec<CurrentSnapshot>,
    history: Vec<HistoricalSeries>,
) -> Vec<CombinedRecord> {
    debug_assert_eq!(current.len(), history.len());

    current
        .into_iter()
        .zip(history)
        .map(|(snapshot, series)| CombinedRecord::merge(snapshot, series))
        .collect()
}
