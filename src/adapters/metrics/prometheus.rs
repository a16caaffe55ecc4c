//! Prometheus Metrics Registry - Catalog Observability
//!
//! Registers the catalog metrics and renders them on `/metrics`.
//! Covers request counts per route/status, upsert outcomes and
//! upload sizes.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use tracing::warn;

use crate::ports::catalog::BatchSummary;

/// Centralized Prometheus metrics for the catalog service.
///
/// All metrics follow the naming convention `port_catalog_*`.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// HTTP requests by route and status code.
    pub http_requests: IntCounterVec,
    /// Request handling latency by route (seconds).
    pub request_latency: HistogramVec,
    /// Upserted ports by outcome (created / updated).
    pub ports_upserted: IntCounterVec,
    /// Ports per accepted upload file.
    pub upload_size: HistogramVec,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let http_requests = IntCounterVec::new(
            Opts::new("port_catalog_http_requests_total", "HTTP requests handled"),
            &["route", "status"],
        )?;

        let request_latency = HistogramVec::new(
            HistogramOpts::new(
                "port_catalog_request_latency_seconds",
                "Request handling latency in seconds",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["route"],
        )?;

        let ports_upserted = IntCounterVec::new(
            Opts::new("port_catalog_ports_upserted_total", "Ports created or updated"),
            &["outcome"],
        )?;

        let upload_size = HistogramVec::new(
            HistogramOpts::new("port_catalog_upload_ports", "Ports per uploaded file")
                .buckets(vec![1.0, 10.0, 100.0, 500.0, 1000.0, 2000.0, 5000.0]),
            &["result"],
        )?;

        registry.register(Box::new(http_requests.clone()))?;
        registry.register(Box::new(request_latency.clone()))?;
        registry.register(Box::new(ports_upserted.clone()))?;
        registry.register(Box::new(upload_size.clone()))?;

        Ok(Self {
            registry,
            http_requests,
            request_latency,
            ports_upserted,
            upload_size,
        })
    }

    /// Count one handled request.
    pub fn record_request(&self, route: &str, status: StatusCode, elapsed_secs: f64) {
        self.http_requests
            .with_label_values(&[route, status.as_str()])
            .inc();
        self.request_latency
            .with_label_values(&[route])
            .observe(elapsed_secs);
    }

    /// Record the result of a bulk upload.
    pub fn record_upload(&self, ports: usize, summary: Option<&BatchSummary>) {
        let result = if summary.is_some() { "stored" } else { "failed" };
        #[allow(clippy::cast_precision_loss)]
        self.upload_size
            .with_label_values(&[result])
            .observe(ports as f64);

        if let Some(summary) = summary {
            self.ports_upserted
                .with_label_values(&["created"])
                .inc_by(summary.created as u64);
            self.ports_upserted
                .with_label_values(&["updated"])
                .inc_by(summary.updated as u64);
        }
    }

    /// Render every registered metric in the text exposition format.
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        if let Err(e) = TextEncoder::new().encode(&self.registry.gather(), &mut buffer) {
            warn!(error = %e, "Failed to encode metrics");
        }
        String::from_utf8(buffer).unwrap_or_default()
    }

    /// `/metrics` route.
    pub fn router(self: Arc<Self>) -> Router {
        Router::new().route(
            "/metrics",
            get(move || {
                let metrics = Arc::clone(&self);
                async move { metrics.render() }
            }),
        )
    }
}
