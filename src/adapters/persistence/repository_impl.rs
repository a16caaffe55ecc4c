//! Catalog Repository - Concrete Adapter for the PortRepository Port
//!
//! Wraps up to two `Storage` backends: a local one (preferred for reads)
//! and a remote one. Writes go to every configured backend with no
//! rollback; reads fall back from local to remote only on `NotFound`.
//!
//! Backends are opaque trait objects. Anything backend-specific lives in
//! the backend's own adapter, never here.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, instrument, warn};

use crate::domain::Port;
use crate::ports::repository::{BackendFailure, PortRepository, RepositoryError};
use crate::ports::storage::{Filter, Storage, StorageError};

/// Port repository over zero, one or two storage backends.
#[derive(Clone, Default)]
pub struct CatalogRepository {
    /// Read-preferred backend (typically in-memory).
    local: Option<Arc<dyn Storage>>,
    /// Fallback backend (typically the document store).
    remote: Option<Arc<dyn Storage>>,
}

impl CatalogRepository {
    /// Create a repository from whichever backends are configured.
    pub fn new(local: Option<Arc<dyn Storage>>, remote: Option<Arc<dyn Storage>>) -> Self {
        Self { local, remote }
    }

    pub fn local_only(local: Arc<dyn Storage>) -> Self {
        Self::new(Some(local), None)
    }

    pub fn remote_only(remote: Arc<dyn Storage>) -> Self {
        Self::new(None, Some(remote))
    }

    /// Local-preferred reads, dual writes.
    pub fn dual(local: Arc<dyn Storage>, remote: Arc<dyn Storage>) -> Self {
        Self::new(Some(local), Some(remote))
    }

    /// Names of the configured backends, local first.
    pub fn backend_names(&self) -> Vec<String> {
        self.backends().map(|s| s.name().to_string()).collect()
    }

    fn backends(&self) -> impl Iterator<Item = &Arc<dyn Storage>> {
        self.local.iter().chain(self.remote.iter())
    }

    /// Run one write against every backend concurrently and collect failures.
    async fn write_all<'a, F, Fut>(&'a self, op: &str, write: F) -> Result<(), RepositoryError>
    where
        F: Fn(&'a Arc<dyn Storage>) -> Fut,
        Fut: std::future::Future<Output = Result<(), StorageError>>,
    {
        let backends: Vec<_> = self.backends().collect();
        if backends.is_empty() {
            return Err(RepositoryError::NoBackends);
        }

        let results = join_all(backends.iter().copied().map(&write)).await;

        let failures: Vec<BackendFailure> = backends
            .iter()
            .zip(results)
            .filter_map(|(backend, result)| {
                result.err().map(|error| {
                    warn!(backend = backend.name(), op, error = %error, "Backend write failed");
                    BackendFailure {
                        backend: backend.name().to_string(),
                        error,
                    }
                })
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RepositoryError::Backends(failures))
        }
    }
}

fn probe_error(backend: &dyn Storage, source: StorageError) -> RepositoryError {
    if source.is_not_found() {
        RepositoryError::NotFound
    } else {
        RepositoryError::Storage {
            backend: backend.name().to_string(),
            source,
        }
    }
}

#[async_trait]
impl PortRepository for CatalogRepository {
    #[instrument(skip(self))]
    async fn find(&self, code: &str) -> Result<Port, RepositoryError> {
        let filter = Filter::by_port_code(code);

        if let Some(local) = &self.local {
            match local.find(&filter).await {
                Ok(port) => return Ok(port),
                Err(StorageError::NotFound) => {
                    debug!(backend = local.name(), "Local miss");
                }
                // Anything but a clean miss is reported, not masked by the remote.
                Err(e) => return Err(probe_error(local.as_ref(), e)),
            }
        }

        match &self.remote {
            Some(remote) => remote
                .find(&filter)
                .await
                .map_err(|e| probe_error(remote.as_ref(), e)),
            None => Err(RepositoryError::NotFound),
        }
    }

    #[instrument(skip(self, port), fields(port_code = %port.port_code))]
    async fn create(&self, port: &Port) -> Result<(), RepositoryError> {
        self.write_all("insert", move |b| b.insert(port)).await
    }

    #[instrument(skip(self, port), fields(port_code = %port.port_code))]
    async fn update(&self, port: &Port) -> Result<(), RepositoryError> {
        let filter = Filter::by_port_code(&port.port_code);
        let filter = &filter;
        self.write_all("update", move |b| b.update(filter, port)).await
    }

    async fn is_healthy(&self) -> bool {
        let checks = join_all(self.backends().map(|b| b.is_healthy())).await;
        checks.into_iter().all(|healthy| healthy)
    }
}
