//! Package Index Cache - memoization for package index lookups
//!
//! Caches existence answers and rendered package pages for a public and a
//! private package index, with LRU eviction and TTL expiration.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{Index, PackageCache};
pub use config::{CacheConfig, Config};
pub use error::CacheError;
