//! Health Check Routes - Liveness and Readiness Probes
//!
//! Exposes /live and /ready for container health checks. Readiness
//! depends on every configured storage backend answering.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::ports::catalog::PortCatalog;

/// Router serving `/live` and `/ready`.
pub fn router(catalog: Arc<dyn PortCatalog>) -> Router {
    Router::new()
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
        .with_state(catalog)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness probe: returns 200 only if the storage backends are healthy.
async fn readiness(State(catalog): State<Arc<dyn PortCatalog>>) -> impl IntoResponse {
    if catalog.is_healthy().await {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}
