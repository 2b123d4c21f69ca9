//! Price Service
//!
//! Serves combined price records from the cache, running the aggregator
//! only on a miss.

use dashboard_core::{CombinedRecord, DashboardResult};
use std::sync::Arc;
use tracing::{error, info};

use crate::aggregator::PriceAggregator;
use crate::price_cache::PriceCache;

/// Cache-then-aggregate orchestration behind `GET /data`
pub struct PriceService {
    cache: Arc<PriceCache>,
    aggregator: PriceAggregator,
}

impl PriceService {
    pub fn new(cache: Arc<PriceCache>, aggregator: PriceAggregator) -> Self {
        Self { cache, aggregator }
    }

    pub fn cache(&self) -> &Arc<PriceCache> {
        &self.cache
    }

    /// Return the combined records, from cache when fresh.
    ///
    /// A failed aggregation leaves the cache untouched.
    pub async fn get_combined_records(&self) -> DashboardResult<Arc<Vec<CombinedRecord>>> {
        if let Some(records) = self.cache.get() {
            info!("Serving from cache");
            return Ok(records);
        }

        info!("Fetching fresh data");
        match self.aggregator.build_combined_records().await {
            Ok(records) => Ok(self.cache.set(records)),
            Err(e) => {
                error!("Error fetching data: {}", e);
                if let Some(status) = e.upstream_status() {
                    error!("Response status: {}", status);
                }
                if let Some(body) = e.upstream_body() {
                    error!("Response data: {}", body);
                }
                Err(e)
            }
        }
    }
}
