//! Cache Entry Module
//!
//! Defines the timestamped entries held by every store.

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// A cached payload together with the wall-clock time it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<V> {
    /// The cached payload
    pub value: V,
    /// Time of the last write to this key
    pub last_update: DateTime<Utc>,
}

/// Whether a package was found in an index when it was cached.
pub type PackageInfo = CacheEntry<bool>;

/// A rendered package page body.
pub type PackagePage = CacheEntry<Vec<u8>>;

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry stamped with `last_update`.
    pub fn new(value: V, last_update: DateTime<Utc>) -> Self {
        Self { value, last_update }
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `ttl` at `now`.
    ///
    /// Expiry is strict: an entry whose age equals the TTL is still fresh, so
    /// a zero TTL keeps an entry visible only for reads in the same instant.
    /// A clock that moved backwards yields a negative age, which never expires.
    pub fn is_expired_at(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.last_update) > ttl
    }

    // == Age ==
    /// Returns how long ago the entry was written.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.last_update)
    }
}

impl PackageInfo {
    /// Returns whether the package existed in the index.
    pub fn exists(&self) -> bool {
        self.value
    }
}

impl PackagePage {
    /// Returns the cached HTML body.
    pub fn html(&self) -> &[u8] {
        &self.value
    }
}
