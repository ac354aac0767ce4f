//! Cache Statistics Module
//!
//! Per-store counters and the snapshots the cache hands out.

use serde::Serialize;

// == Store Stats ==
/// Tracks lookup outcomes and removals for a single store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Lookups that returned a fresh entry
    pub hits: u64,
    /// Lookups that found nothing usable (absent or expired)
    pub misses: u64,
    /// Entries removed because a read found them past the TTL
    pub expirations: u64,
    /// Entries removed to make room under the capacity limit
    pub evictions: u64,
    /// Entries currently held, expired-but-unread ones included
    pub entries: usize,
}

impl StoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// An expired read is both a miss and an expiration.
    pub fn record_expiration(&mut self) {
        self.misses += 1;
        self.expirations += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn set_entries(&mut self, count: usize) {
        self.entries = count;
    }
}

// == Cache Counts ==
/// Number of entries held by each store.
///
/// Counts are taken without a TTL check, so entries that expired but have
/// not been read since are still included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheCounts {
    pub public_packages: usize,
    pub private_packages: usize,
    pub public_pages: usize,
    pub private_pages: usize,
}

impl CacheCounts {
    /// Sum across all stores.
    pub fn total(&self) -> usize {
        self.public_packages + self.private_packages + self.public_pages + self.private_pages
    }
}

// == Cache Metrics ==
/// Counters for every store of a cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheMetrics {
    pub public_packages: StoreStats,
    pub private_packages: StoreStats,
    pub public_pages: StoreStats,
    pub private_pages: StoreStats,
}
