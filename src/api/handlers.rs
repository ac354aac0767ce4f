//! API Handlers
//!
//! HTTP request handlers for the status server endpoints.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use crate::cache::PackageCache;
use crate::models::{CacheSummary, ClearResponse, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// The cache synchronizes internally, so handlers share it through a plain
/// `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<PackageCache>,
}

impl AppState {
    /// Creates a new AppState around an existing cache handle.
    pub fn new(cache: Arc<PackageCache>) -> Self {
        Self { cache }
    }
}

/// Handler for GET /health
///
/// Reports liveness along with per-store entry counts.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = &state.cache;

    Json(HealthResponse::healthy(CacheSummary {
        enabled: cache.is_enabled(),
        page_caching: cache.page_caching_enabled(),
        counts: cache.stats(),
    }))
}

/// Handler for GET /stats
///
/// Returns lookup counters for every store.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.cache.is_enabled(),
        state.cache.metrics(),
    ))
}

/// Handler for DELETE /cache
///
/// Drops every cached entry.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.clear();
    info!(cleared, "Cache cleared via status server");

    Json(ClearResponse::new(cleared))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Index;
    use crate::config::CacheConfig;

    fn state() -> AppState {
        let cache = PackageCache::new(CacheConfig::new(100, 12, true)).unwrap();
        AppState::new(Arc::new(cache))
    }

    #[tokio::test]
    async fn test_health_handler() {
        let state = state();
        state.cache.set_package(Index::Public, "requests", true);

        let response = health_handler(State(state)).await;
        assert_eq!(response.status, "healthy");
        assert!(response.cache.enabled);
        assert!(response.cache.page_caching);
        assert_eq!(response.cache.counts.public_packages, 1);
    }

    #[tokio::test]
    async fn test_health_handler_disabled() {
        let state = AppState::new(Arc::new(PackageCache::disabled()));

        let response = health_handler(State(state)).await;
        assert_eq!(response.status, "healthy");
        assert!(!response.cache.enabled);
        assert_eq!(response.cache.counts.total(), 0);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = state();
        state.cache.set_package(Index::Private, "internal-sdk", true);
        state.cache.get_package(Index::Private, "internal-sdk");
        state.cache.get_package(Index::Private, "unknown");

        let response = stats_handler(State(state)).await;
        assert!(response.enabled);
        assert_eq!(response.private_packages.stats.hits, 1);
        assert_eq!(response.private_packages.stats.misses, 1);
        assert_eq!(response.private_packages.hit_rate, 0.5);
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let state = state();
        state.cache.set_package(Index::Public, "a", true);
        state.cache.set_page(Index::Public, "a", "<html/>");

        let response = clear_handler(State(state.clone())).await;
        assert_eq!(response.cleared, 2);
        assert_eq!(state.cache.stats().total(), 0);
    }
}
