//! Price Cache Service
//!
//! Single-entry in-memory cache for the combined price records. The entry
//! expires passively: once the TTL has elapsed reads report it as absent,
//! and the next successful aggregation overwrites it.

use dashboard_core::CombinedRecord;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cache TTL in seconds (5 minutes)
pub const CACHE_TTL_SECS: u64 = 300;

/// Source of the current time for expiry checks
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to; used to test expiry
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    /// Move the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Cached records with metadata
#[derive(Debug, Clone)]
struct CacheEntry {
    records: Arc<Vec<CombinedRecord>>,
    inserted_at: Instant,
}

/// Snapshot of the cache state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Whether a fresh entry is present
    pub populated: bool,
    /// Age of the fresh entry
    pub age: Option<Duration>,
}

/// Process-wide cache holding at most one set of combined records
pub struct PriceCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entry: RwLock<Option<CacheEntry>>,
}

impl PriceCache {
    /// Create a cache with the given TTL using the system clock
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache with an injected clock
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entry: RwLock::new(None),
        }
    }

    /// Return the cached records if present and younger than the TTL
    pub fn get(&self) -> Option<Arc<Vec<CombinedRecord>>> {
        let now = self.clock.now();
        let entry = self.entry.read();
        match entry.as_ref() {
            Some(e) if now.saturating_duration_since(e.inserted_at) < self.ttl => {
                Some(Arc::clone(&e.records))
            }
            Some(_) => {
                debug!("Price cache entry expired");
                None
            }
            None => None,
        }
    }

    /// Store `records`, replacing any previous entry and restarting the TTL
    pub fn set(&self, records: Vec<CombinedRecord>) -> Arc<Vec<CombinedRecord>> {
        let records = Arc::new(records);
        *self.entry.write() = Some(CacheEntry {
            records: Arc::clone(&records),
            inserted_at: self.clock.now(),
        });
        debug!("Price cache populated with {} records", records.len());
        records
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let age = self
            .entry
            .read()
            .as_ref()
            .map(|e| now.saturating_duration_since(e.inserted_at))
            .filter(|age| *age < self.ttl);

        CacheStats {
            populated: age.is_some(),
            age,
        }
    }
}
