//! Exponential backoff for rate-limited upstream calls
//!
//! Only HTTP 429 responses are retried. Any other failure, and the 429 that
//! arrives once the retry budget is spent, is returned to the caller as is.

use std::future::Future;
use std::time::Duration;

use dashboard_core::DashboardResult;
use tracing::warn;

/// Number of retries after the first attempt
pub const DEFAULT_RETRIES: u32 = 3;

/// Delay before the first retry (300ms)
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 300;

/// Factor applied to the delay after every retry
pub const DEFAULT_BACKOFF_MULTIPLIER: u32 = 2;

/// Retry schedule for rate-limited requests
///
/// With the defaults a request is attempted at most 4 times, sleeping
/// 300ms, 600ms and 1200ms between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries (attempts = retries + 1)
    pub retries: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Multiplier applied to the delay for each subsequent retry
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            initial_backoff: Duration::from_millis(DEFAULT_INITIAL_BACKOFF_MS),
            multiplier: DEFAULT_BACKOFF_MULTIPLIER,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait before retry number `retry` (0-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(self.multiplier.saturating_pow(retry))
    }

    /// Run `op` until it succeeds, fails with a non-429 error, or the retry
    /// budget is exhausted.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> DashboardResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = DashboardResult<T>>,
    {
        let mut retry = 0;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_rate_limited() && retry < self.retries => {
                    let delay = self.delay_for(retry);
                    retry += 1;
                    warn!(
                        "[RETRY] {} rate limited, retry {}/{} in {:?}",
                        label, retry, self.retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
