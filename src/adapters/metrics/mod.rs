//! Metrics and Monitoring Adapters
//!
//! Prometheus metrics export (`/metrics`) and health check endpoints
//! (`/live`, `/ready`), merged into the main axum router.

pub mod health;
pub mod prometheus;

pub use prometheus::MetricsRegistry;
