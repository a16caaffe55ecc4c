//! HTTP Adapter - axum Router for the Ports API
//!
//! Routes:
//! - `POST /ports`: multipart upload (`ports` field) of a JSON object of ports
//! - `GET /ports/{port_code}`: single port lookup
//! - `GET /live`, `GET /ready`: health probes
//! - `GET /metrics` - Prometheus exposition (when enabled)

pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

pub use error::ApiError;
pub use handlers::AppState;

use crate::adapters::metrics::health;

/// Build the full application router.
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    let api = Router::new()
        .route("/ports", post(handlers::upload_ports))
        .route("/ports/", get(handlers::missing_port_code))
        .route("/ports/:port_code", get(handlers::get_port))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::track_requests,
        ))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state.clone());

    let mut router = api.merge(health::router(Arc::clone(&state.catalog)));
    if let Some(metrics) = &state.metrics {
        router = router.merge(Arc::clone(metrics).router());
    }
    router
}
