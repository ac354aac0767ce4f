//! Cache Module
//!
//! Memoizes package index answers and rendered package pages, separately for
//! the public and the private index, with LRU eviction and lazy TTL expiry.
//!
//! The cache never talks to an index itself. Callers look up, and on a miss
//! ask the index and store the answer:
//!
//! ```
//! use package_index_cache::cache::{Index, PackageCache};
//! use package_index_cache::config::CacheConfig;
//!
//! let cache = PackageCache::new(CacheConfig::new(100, 12, true)).unwrap();
//!
//! let exists = match cache.get_package(Index::Private, "internal-sdk") {
//!     Some(info) => info.exists(),
//!     None => {
//!         let exists = true; // ask the private index here
//!         cache.set_package(Index::Private, "internal-sdk", exists);
//!         exists
//!     }
//! };
//! assert!(exists);
//! ```

mod entry;
mod lru;
mod stats;
mod store;


use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::info;

use crate::config::CacheConfig;
use crate::error::Result;

// Re-export public types
pub use entry::{CacheEntry, PackageInfo, PackagePage};
pub use lru::LruTracker;
pub use stats::{CacheCounts, CacheMetrics, StoreStats};
pub use store::TtlLruStore;

// == Index ==
/// Which package index an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Index {
    Public,
    Private,
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Public => f.write_str("public"),
            Index::Private => f.write_str("private"),
        }
    }
}

// == Stores ==
/// Backing stores of an enabled cache.
#[derive(Debug)]
struct Stores {
    public_packages: TtlLruStore<bool>,
    private_packages: TtlLruStore<bool>,
    /// Absent when page caching is turned off
    pages: Option<PageStores>,
}

#[derive(Debug)]
struct PageStores {
    public: TtlLruStore<Vec<u8>>,
    private: TtlLruStore<Vec<u8>>,
}

impl Stores {
    fn new(config: &CacheConfig) -> Result<Self> {
        let ttl = config.ttl();
        let pages = if config.cache_pages {
            Some(PageStores {
                public: TtlLruStore::new("public_pages", config.capacity, ttl)?,
                private: TtlLruStore::new("private_pages", config.capacity, ttl)?,
            })
        } else {
            None
        };

        Ok(Self {
            public_packages: TtlLruStore::new("public_packages", config.capacity, ttl)?,
            private_packages: TtlLruStore::new("private_packages", config.capacity, ttl)?,
            pages,
        })
    }

    fn packages(&mut self, index: Index) -> &mut TtlLruStore<bool> {
        match index {
            Index::Public => &mut self.public_packages,
            Index::Private => &mut self.private_packages,
        }
    }

    fn pages(&mut self, index: Index) -> Option<&mut TtlLruStore<Vec<u8>>> {
        self.pages.as_mut().map(|pages| match index {
            Index::Public => &mut pages.public,
            Index::Private => &mut pages.private,
        })
    }
}

// == Package Cache ==
/// Bounded, TTL-limited memo of package index lookups.
///
/// All stores sit behind a single reader/writer lock. Lookups take it
/// exclusively because a hit updates recency and an expired hit removes the
/// entry; `stats` and `metrics` share it. A disabled cache holds no stores
/// and answers every lookup with `None`.
///
/// Share between callers as `Arc<PackageCache>`.
#[derive(Debug)]
pub struct PackageCache {
    stores: Option<RwLock<Stores>>,
    config: CacheConfig,
}

impl PackageCache {
    // == Constructor ==
    /// Builds a cache from `config`.
    ///
    /// # Errors
    /// `InvalidConfiguration` when the cache is enabled with zero capacity.
    pub fn new(config: CacheConfig) -> Result<Self> {
        if !config.enabled {
            info!("Package cache disabled");
            return Ok(Self {
                stores: None,
                config,
            });
        }

        let stores = Stores::new(&config)?;
        info!(
            capacity = config.capacity,
            ttl_hours = config.ttl_hours,
            cache_pages = config.cache_pages,
            "Package cache initialized"
        );

        Ok(Self {
            stores: Some(RwLock::new(stores)),
            config,
        })
    }

    /// A pass-through cache that stores nothing.
    pub fn disabled() -> Self {
        Self {
            stores: None,
            config: CacheConfig {
                enabled: false,
                ..CacheConfig::default()
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.stores.is_some()
    }

    /// True when page lookups can hit.
    pub fn page_caching_enabled(&self) -> bool {
        self.is_enabled() && self.config.cache_pages
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Package Existence ==
    /// Cached existence answer for `name` in `index`.
    pub fn get_package(&self, index: Index, name: &str) -> Option<PackageInfo> {
        self.write()?.packages(index).get(name)
    }

    /// Records whether `name` exists in `index`.
    pub fn set_package(&self, index: Index, name: &str, exists: bool) {
        if let Some(mut stores) = self.write() {
            stores.packages(index).set(name, exists);
        }
    }

    // == Package Pages ==
    /// Cached page body for `name` from `index`.
    pub fn get_page(&self, index: Index, name: &str) -> Option<PackagePage> {
        self.write()?.pages(index)?.get(name)
    }

    /// Records the page body for `name` from `index`.
    pub fn set_page(&self, index: Index, name: &str, html: impl Into<Vec<u8>>) {
        if let Some(mut stores) = self.write() {
            if let Some(pages) = stores.pages(index) {
                pages.set(name, html.into());
            }
        }
    }

    // == Clear ==
    /// Empties every store in one exclusive section.
    ///
    /// Returns the number of entries dropped.
    pub fn clear(&self) -> usize {
        let Some(mut stores) = self.write() else {
            return 0;
        };

        let mut cleared = stores.public_packages.len() + stores.private_packages.len();
        stores.public_packages.clear();
        stores.private_packages.clear();
        if let Some(pages) = stores.pages.as_mut() {
            cleared += pages.public.len() + pages.private.len();
            pages.public.clear();
            pages.private.clear();
        }
        info!(cleared, "Package cache cleared");
        cleared
    }

    // == Stats ==
    /// Entry count per store, expired-but-unread entries included.
    pub fn stats(&self) -> CacheCounts {
        let Some(stores) = self.read() else {
            return CacheCounts::default();
        };

        CacheCounts {
            public_packages: stores.public_packages.len(),
            private_packages: stores.private_packages.len(),
            public_pages: stores.pages.as_ref().map_or(0, |p| p.public.len()),
            private_pages: stores.pages.as_ref().map_or(0, |p| p.private.len()),
        }
    }

    /// Lookup counters per store.
    pub fn metrics(&self) -> CacheMetrics {
        let Some(stores) = self.read() else {
            return CacheMetrics::default();
        };

        CacheMetrics {
            public_packages: stores.public_packages.stats(),
            private_packages: stores.private_packages.stats(),
            public_pages: stores.pages.as_ref().map(|p| p.public.stats()).unwrap_or_default(),
            private_pages: stores.pages.as_ref().map(|p| p.private.stats()).unwrap_or_default(),
        }
    }

    // == Locking ==
    // Store operations never panic halfway through a mutation, so a poisoned
    // lock still guards consistent data.
    fn read(&self) -> Option<RwLockReadGuard<'_, Stores>> {
        self.stores
            .as_ref()
            .map(|lock| lock.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write(&self) -> Option<RwLockWriteGuard<'_, Stores>> {
        self.stores
            .as_ref()
            .map(|lock| lock.write().unwrap_or_else(PoisonError::into_inner))
    }
}
