//! Catalog Port - Inbound Interface for the HTTP Layer
//!
//! What the HTTP adapter needs from the application: lookups and
//! create-or-update, single and bulk.

use async_trait::async_trait;
use thiserror::Error;

use super::repository::RepositoryError;
use crate::domain::Port;

/// What a single create-or-update ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
  Created,
  Updated,
}

/// Counts from a successful bulk upsert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
  pub created: usize,
  pub updated: usize,
}

impl BatchSummary {
  pub fn total(&self) -> usize {
    self.created + self.updated
  }
}

/// Errors surfaced by the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
  /// The port code is empty or blank.
  #[error("port code must not be empty")]
  InvalidPortCode,
  #[error(transparent)]
  Repository(#[from] RepositoryError),
  /// At least one record of a bulk call failed; `first` is the earliest in input order.
  #[error("{failed} of {total} ports failed to persist, first error: {first}")]
  Batch {
    failed: usize,
    total: usize,
    first: Box<ServiceError>,
  },
}

impl ServiceError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::Repository(e) if e.is_not_found())
  }
}

/// Trait for the port catalog use case.
#[async_trait]
pub trait PortCatalog: Send + Sync + 'static {
  /// Look up a port by code.
  async fn get_by_code(&self, code: &str) -> Result<Port, ServiceError>;

  /// Create the port if unknown, otherwise replace it.
  async fn create_or_update(&self, port: Port) -> Result<UpsertOutcome, ServiceError>;

  /// Create-or-update every port concurrently; fails if any record failed.
  async fn create_or_update_many(&self, ports: Vec<Port>) -> Result<BatchSummary, ServiceError>;

  /// Whether the storage behind the catalog is healthy.
  async fn is_healthy(&self) -> bool;
}
