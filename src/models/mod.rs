//! Response models for the status server
//!
//! Defines the JSON bodies returned by the status endpoints.

pub mod responses;

// Re-export commonly used types
pub use responses::{CacheSummary, ClearResponse, HealthResponse, StatsResponse, StoreReport};
