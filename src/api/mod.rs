//! API Module
//!
//! HTTP handlers and routing for the cache status server.
//!
//! # Endpoints
//! - `GET /health` - Health check with cache entry counts
//! - `GET /stats` - Per-store lookup counters
//! - `DELETE /cache` - Drop every cached entry

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
