//! Repository Port - Domain-Level Port Persistence
//!
//! The single persistence entry point the service talks to. Whether one
//! backend or two sit behind it is an adapter concern.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use super::storage::StorageError;
use crate::domain::Port;

/// One backend's failure inside a multi-backend write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendFailure {
  /// Backend name as reported by `Storage::name`.
  pub backend: String,
  /// The untouched storage error.
  pub error: StorageError,
}

impl fmt::Display for BackendFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.backend, self.error)
  }
}

/// Errors returned by a `PortRepository`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
  /// No configured backend holds the port.
  #[error("port not found")]
  NotFound,
  /// A single backend failed a lookup.
  #[error("{backend} storage failed: {source}")]
  Storage {
    backend: String,
    #[source]
    source: StorageError,
  },
  /// One or more backends failed a write. Succeeding backends keep their write.
  #[error("{} backend write(s) failed: {}", .0.len(), join_failures(.0))]
  Backends(Vec<BackendFailure>),
  /// Nothing to write to.
  #[error("no storage backend configured")]
  NoBackends,
}

impl RepositoryError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound)
  }
}

fn join_failures(failures: &[BackendFailure]) -> String {
  failures
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

/// Trait for port persistence.
#[async_trait]
pub trait PortRepository: Send + Sync + 'static {
  /// Find a port by its code.
  async fn find(&self, code: &str) -> Result<Port, RepositoryError>;

  /// Persist a new port in every configured backend.
  async fn create(&self, port: &Port) -> Result<(), RepositoryError>;

  /// Replace an existing port in every configured backend.
  async fn update(&self, port: &Port) -> Result<(), RepositoryError>;

  /// Check if every configured backend is healthy.
  async fn is_healthy(&self) -> bool;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_aggregate_message_keeps_every_cause() {
    let err = RepositoryError::Backends(vec![
      BackendFailure {
        backend: "memory".to_string(),
        error: StorageError::InvalidFilter("missing port_code".to_string()),
      },
      BackendFailure {
        backend: "document".to_string(),
        error: StorageError::Backend("connection refused".to_string()),
      },
    ]);
    let msg = err.to_string();
    assert!(msg.starts_with("2 backend write(s) failed"));
    assert!(msg.contains("memory: invalid filter"));
    assert!(msg.contains("document: backend failure: connection refused"));
  }
}
