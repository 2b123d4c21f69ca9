//! Per-client rate limiter for the public API
//!
//! Sliding-window log: each client may make at most `max_requests` requests
//! in any `window`-long interval. Rejected requests are not recorded, so a
//! client hammering the endpoint does not extend its own lockout.

use std::{
    collections::{HashMap, VecDeque},
    net::IpAddr,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};

/// Default request budget per client per window
pub const DEFAULT_MAX_REQUESTS: usize = 10;

/// Default window length (60 seconds)
pub const DEFAULT_WINDOW_SECS: u64 = 60;

/// Number of tracked clients above which idle clients are swept
const SWEEP_THRESHOLD: usize = 1024;

/// Sliding-window rate limiter keyed by client address
#[derive(Debug)]
pub struct ClientRateLimiter {
    /// Accepted request times per client, oldest first
    clients: Mutex<HashMap<IpAddr, VecDeque<Instant>>>,
    max_requests: usize,
    window: Duration,
    /// Counter for debugging - total requests checked
    total_requests: AtomicU64,
    /// Counter for debugging - requests rejected
    rejected_requests: AtomicU64,
}

impl ClientRateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
            max_requests,
            window,
            total_requests: AtomicU64::new(0),
            rejected_requests: AtomicU64::new(0),
        }
    }

    /// Record a request from `client` if it is within budget.
    ///
    /// Returns `Err(retry_after)` with the time until the oldest request in
    /// the window expires when the client is over budget.
    pub async fn check(&self, client: IpAddr) -> Result<(), Duration> {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        let now = Instant::now();

        let mut clients = self.clients.lock().await;
        if clients.len() > SWEEP_THRESHOLD {
            let window = self.window;
            clients.retain(|_, hits| {
                hits.back()
                    .is_some_and(|last| now.saturating_duration_since(*last) < window)
            });
        }

        let hits = clients.entry(client).or_default();
        while let Some(oldest) = hits.front() {
            if now.saturating_duration_since(*oldest) >= self.window {
                hits.pop_front();
            } else {
                break;
            }
        }

        if hits.len() >= self.max_requests {
            self.rejected_requests.fetch_add(1, Ordering::Relaxed);
            let retry_after = hits
                .front()
                .map(|oldest| (*oldest + self.window).saturating_duration_since(now))
                .unwrap_or(self.window);
            info!(
                "[RATE_LIMITER] {} REJECTED - {} requests in window, retry in {:?}",
                client,
                hits.len(),
                retry_after
            );
            return Err(retry_after);
        }

        hits.push_back(now);
        debug!(
            "[RATE_LIMITER] {} ACCEPTED - {}/{} in window",
            client,
            hits.len(),
            self.max_requests
        );
        Ok(())
    }

    /// Get statistics about this rate limiter (for debugging)
    pub fn stats(&self) -> RateLimiterStats {
        RateLimiterStats {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            rejected_requests: self.rejected_requests.load(Ordering::Relaxed),
        }
    }
}

impl Default for ClientRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, Duration::from_secs(DEFAULT_WINDOW_SECS))
    }
}

/// Statistics about rate limiter usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiterStats {
    pub total_requests: u64,
    pub rejected_requests: u64,
}
