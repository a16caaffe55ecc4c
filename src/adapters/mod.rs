//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! infrastructure, and drives the use cases from HTTP.
//!
//! Adapter categories:
//! - `http`: axum router and handlers for the ports API
//! - `metrics`: Prometheus metrics export and health checks
//! - `persistence`: in-memory and document-store backends, catalog repository

pub mod http;
pub mod metrics;
pub mod persistence;
