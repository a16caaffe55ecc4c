//! Ports API handlers.
//!
//! Thin axum handlers: extract, call the `PortCatalog`, map the outcome
//! to a status code and body. Causes are logged here, never returned.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{MatchedPath, Multipart, Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{decode_upload, PortResponse};
use super::error::ApiError;
use crate::adapters::metrics::MetricsRegistry;
use crate::ports::catalog::{PortCatalog, ServiceError};

/// Multipart field carrying the ports JSON file.
pub const PORTS_FIELD: &str = "ports";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// Catalog use case.
    pub catalog: Arc<dyn PortCatalog>,
    /// Metrics sink, when metrics are enabled.
    pub metrics: Option<Arc<MetricsRegistry>>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn PortCatalog>, metrics: Option<Arc<MetricsRegistry>>) -> Self {
        Self { catalog, metrics }
    }
}

/// `POST /ports`: bulk create-or-update from a multipart JSON upload.
#[instrument(skip_all, fields(upload_id = %Uuid::new_v4()))]
pub async fn upload_ports(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        warn!(error = %e, "Upload is not a multipart form");
        ApiError::no_ports_file()
    })?;

    let bytes = read_ports_field(&mut multipart).await?;

    let ports = decode_upload(&bytes).map_err(|e| {
        warn!(error = %e, size = bytes.len(), "Upload is not a ports JSON object");
        ApiError::bad_json_file()
    })?;

    let count = ports.len();
    info!(count, "Ports upload decoded");

    match state.catalog.create_or_update_many(ports).await {
        Ok(summary) => {
            if let Some(metrics) = &state.metrics {
                metrics.record_upload(count, Some(&summary));
            }
            Ok((StatusCode::CREATED, Json(serde_json::json!({}))))
        }
        Err(e) => {
            warn!(error = %e, "Failed to store uploaded ports");
            if let Some(metrics) = &state.metrics {
                metrics.record_upload(count, None);
            }
            Err(ApiError::data_store())
        }
    }
}

/// Pull the `ports` file out of the form, skipping any other fields.
async fn read_ports_field(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    loop {
        let field = multipart.next_field().await.map_err(read_error)?;

        let Some(field) = field else {
            return Err(ApiError::no_ports_file());
        };

        if field.name() != Some(PORTS_FIELD) {
            continue;
        }

        let bytes = field.bytes().await.map_err(read_error)?;
        return Ok(bytes.to_vec());
    }
}

/// Oversized bodies are the client's fault; anything else is an I/O failure.
fn read_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(error = %e, "Upload exceeds the body limit");
        ApiError::upload_too_large()
    } else {
        warn!(error = %e, "Failed to read multipart upload");
        ApiError::internal()
    }
}

/// `GET /ports/{port_code}`
pub async fn get_port(
    State(state): State<AppState>,
    Path(port_code): Path<String>,
) -> Result<Json<PortResponse>, ApiError> {
    if port_code.trim().is_empty() {
        return Err(ApiError::no_port_code());
    }

    match state.catalog.get_by_code(&port_code).await {
        Ok(port) => Ok(Json(PortResponse::from(port))),
        Err(e) if e.is_not_found() => Err(ApiError::not_found()),
        Err(ServiceError::InvalidPortCode) => Err(ApiError::no_port_code()),
        Err(e) => {
            warn!(port_code = %port_code, error = %e, "Port lookup failed");
            Err(ApiError::internal())
        }
    }
}

/// `GET /ports/`: the path parameter is missing.
pub async fn missing_port_code() -> ApiError {
    ApiError::no_port_code()
}

/// Route-level middleware: request log line plus request metrics.
pub async fn track_requests(
    State(state): State<AppState>,
    matched: Option<MatchedPath>,
    request: Request,
    next: Next,
) -> Response {
    let route = matched.map_or_else(|| "unmatched".to_string(), |m| m.as_str().to_string());
    let method = request.method().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let elapsed = started.elapsed();
    info!(
        method = %method,
        route = %route,
        status = response.status().as_u16(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Request handled"
    );
    if let Some(metrics) = &state.metrics {
        metrics.record_request(&route, response.status(), elapsed.as_secs_f64());
    }

    response
}
