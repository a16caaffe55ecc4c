//! Port Catalog - Entry Point
//!
//! Wiring sequence:
//! 1. Load config.toml (optional) + PORT_CATALOG_* overrides + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Build storage backends (in-memory and/or document store)
//! 4. Build CatalogRepository → PortService
//! 5. Build the axum router (ports API, health, metrics)
//! 6. Serve until SIGINT/SIGTERM, then drain in-flight requests

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::broadcast;
use tracing::{info, warn};

use port_catalog::adapters::http::{create_router, AppState};
use port_catalog::adapters::metrics::MetricsRegistry;
use port_catalog::adapters::persistence::{
    CatalogRepository, DataApiCollection, DataApiConfig, DocumentStorage, InMemoryStorage,
};
use port_catalog::config::{self, AppConfig};
use port_catalog::ports::catalog::PortCatalog;
use port_catalog::ports::storage::Storage;
use port_catalog::usecases::PortService;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config = config::loader::load_from_env().context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.server.port,
        "Starting port catalog"
    );

    // ── 3-4. Storage backends → repository → service ────────
    let repository = build_repository(&config)?;
    info!(backends = ?repository.backend_names(), "Storage backends wired");
    let catalog: Arc<dyn PortCatalog> = Arc::new(PortService::new(Arc::new(repository)));

    // ── 5. Router ───────────────────────────────────────────
    let metrics = if config.metrics.enabled {
        Some(Arc::new(
            MetricsRegistry::new().context("Failed to register metrics")?,
        ))
    } else {
        None
    };
    let app = create_router(AppState::new(catalog, metrics), config.server.max_upload_bytes);

    // ── 6. Serve with graceful shutdown ─────────────────────
    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %addr, "Ports API listening");

    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await
    });

    wait_for_signal().await;

    let _ = shutdown_tx.send(());
    info!("Shutdown signal sent, draining in-flight requests");

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    match tokio::time::timeout(grace, server).await {
        Ok(Ok(Ok(()))) => info!("Shutdown complete"),
        Ok(Ok(Err(e))) => warn!(error = %e, "Server exited with error"),
        Ok(Err(e)) => warn!(error = %e, "Server task panicked"),
        Err(_) => warn!(grace_secs = grace.as_secs(), "Forced shutdown after grace period"),
    }

    Ok(())
}

/// Wire the configured backends into a repository.
///
/// Without document store settings the catalog runs local-only.
fn build_repository(config: &AppConfig) -> Result<CatalogRepository> {
    let local: Option<Arc<dyn Storage>> = config
        .storage
        .local
        .then(|| Arc::new(InMemoryStorage::new()) as Arc<dyn Storage>);

    let remote: Option<Arc<dyn Storage>> = match config.storage.document_store() {
        Some(document) => {
            let collection = DataApiCollection::new(DataApiConfig::from(document))
                .context("Failed to create document store client")?;
            info!(
                database = %document.database,
                collection = %document.collection,
                "Document store enabled"
            );
            Some(Arc::new(DocumentStorage::new(Arc::new(collection))) as Arc<dyn Storage>)
        }
        None => {
            info!("No document store configured, running local-only");
            None
        }
    };

    Ok(CatalogRepository::new(local, remote))
}

/// Resolve on SIGINT, or SIGTERM on Unix.
async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("SIGINT received, initiating graceful shutdown"),
        () = terminate => info!("SIGTERM received, initiating graceful shutdown"),
    }
}
