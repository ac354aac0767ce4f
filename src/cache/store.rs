//! Cache Store Module
//!
//! Generic bounded store combining HashMap storage with LRU tracking and
//! lazy TTL expiration. One instance backs each of the cache's stores.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::cache::{CacheEntry, LruTracker, StoreStats};
use crate::error::{CacheError, Result};

// == TTL LRU Store ==
/// Capacity-bounded store with LRU eviction and read-time TTL expiry.
#[derive(Debug)]
pub struct TtlLruStore<V> {
    /// Store name, used in log events
    name: &'static str,
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Lookup and removal counters
    stats: StoreStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Maximum age of a readable entry
    ttl: Duration,
}

impl<V: Clone> TtlLruStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Errors
    /// `InvalidConfiguration` when `capacity` is zero.
    pub fn new(name: &'static str, capacity: usize, ttl: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(format!(
                "{} store capacity must be positive",
                name
            )));
        }

        Ok(Self {
            name,
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: StoreStats::new(),
            capacity,
            ttl,
        })
    }

    // == Get ==
    /// Looks a key up against the current wall-clock time.
    pub fn get(&mut self, key: &str) -> Option<CacheEntry<V>> {
        self.get_at(key, Utc::now())
    }

    /// Looks a key up as of `now`.
    ///
    /// A fresh entry is returned and promoted to most recently used. An entry
    /// older than the TTL is removed and reported as a miss.
    pub fn get_at(&mut self, key: &str, now: DateTime<Utc>) -> Option<CacheEntry<V>> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(self.ttl, now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expiration();
            self.stats.set_entries(self.entries.len());
            debug!(store = self.name, key, "expired entry removed on read");
            return None;
        }

        self.lru.touch(key);
        self.stats.record_hit();
        self.entries.get(key).cloned()
    }

    // == Set ==
    /// Writes a key stamped with the current wall-clock time.
    pub fn set(&mut self, key: &str, value: V) {
        self.set_at(key, value, Utc::now());
    }

    /// Writes a key stamped with `now`.
    ///
    /// Overwriting resets the timestamp and never evicts. Inserting a new key
    /// into a full store evicts the least recently used key first.
    pub fn set_at(&mut self, key: &str, value: V, now: DateTime<Utc>) {
        if let Some(entry) = self.entries.get_mut(key) {
            *entry = CacheEntry::new(value, now);
            self.lru.touch(key);
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(store = self.name, key = %evicted, "evicted least recently used entry");
            }
        }

        self.entries.insert(key.to_string(), CacheEntry::new(value, now));
        self.lru.touch(key);
        self.stats.set_entries(self.entries.len());
    }

    // == Clear ==
    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats = StoreStats::new();
    }

    // == Stats ==
    /// Returns current counters, entry count included.
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats;
        stats.set_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of held entries, without a TTL check.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
