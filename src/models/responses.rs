//! Response DTOs for the status server
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheCounts, CacheMetrics, StoreStats};

/// Cache section of the health response
#[derive(Debug, Clone, Serialize)]
pub struct CacheSummary {
    /// Whether the cache stores anything at all
    pub enabled: bool,
    /// Whether page stores are allocated
    pub page_caching: bool,
    /// Entry counts per store
    #[serde(flatten)]
    pub counts: CacheCounts,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    pub cache: CacheSummary,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache: CacheSummary) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            cache,
        }
    }
}

/// Counters for one store, with the derived hit rate
#[derive(Debug, Clone, Serialize)]
pub struct StoreReport {
    #[serde(flatten)]
    pub stats: StoreStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StoreStats> for StoreReport {
    fn from(stats: StoreStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub enabled: bool,
    pub public_packages: StoreReport,
    pub private_packages: StoreReport,
    pub public_pages: StoreReport,
    pub private_pages: StoreReport,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache metrics
    pub fn new(enabled: bool, metrics: CacheMetrics) -> Self {
        Self {
            enabled,
            public_packages: metrics.public_packages.into(),
            private_packages: metrics.private_packages.into(),
            public_pages: metrics.public_pages.into(),
            private_pages: metrics.private_pages.into(),
        }
    }
}

/// Response body for the clear operation (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Number of entries dropped across all stores
    pub cleared: usize,
}

impl ClearResponse {
    /// Creates a new ClearResponse
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cached entries", cleared),
            cleared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy(CacheSummary {
            enabled: true,
            page_caching: false,
            counts: CacheCounts {
                public_packages: 4,
                ..CacheCounts::default()
            },
        });
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["status"], "healthy");
        assert!(json.get("timestamp").is_some());
        assert_eq!(json["cache"]["enabled"], true);
        assert_eq!(json["cache"]["page_caching"], false);
        assert_eq!(json["cache"]["public_packages"], 4);
        assert_eq!(json["cache"]["private_pages"], 0);
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let metrics = CacheMetrics {
            public_packages: StoreStats {
                hits: 80,
                misses: 20,
                expirations: 5,
                evictions: 2,
                entries: 10,
            },
            ..CacheMetrics::default()
        };
        let resp = StatsResponse::new(true, metrics);

        assert!((resp.public_packages.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.private_pages.hit_rate, 0.0);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["public_packages"]["hits"], 80);
        assert_eq!(json["public_packages"]["expirations"], 5);
    }

    #[test]
    fn test_clear_response_serialize() {
        let resp = ClearResponse::new(7);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"cleared\":7"));
        assert!(json.contains("Cleared 7"));
    }
}
