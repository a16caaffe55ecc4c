//! Port Service - Create-or-Update Orchestration
//!
//! Decides between create and update by probing the repository, and
//! fans bulk uploads out into one concurrent upsert per record.
//!
//! Only a clean `NotFound` leads to a create. Any other lookup error is
//! returned to the caller instead of being treated as "found".

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, info, instrument, warn};

use crate::domain::Port;
use crate::ports::catalog::{BatchSummary, PortCatalog, ServiceError, UpsertOutcome};
use crate::ports::repository::{PortRepository, RepositoryError};

/// Catalog use case over a port repository.
pub struct PortService<R: PortRepository> {
  /// Persistence port.
  repo: Arc<R>,
}

impl<R: PortRepository> PortService<R> {
  pub fn new(repo: Arc<R>) -> Self {
    Self { repo }
  }

  fn validate_code(code: &str) -> Result<(), ServiceError> {
    if code.trim().is_empty() {
      return Err(ServiceError::InvalidPortCode);
    }
    Ok(())
  }
}

#[async_trait]
impl<R: PortRepository> PortCatalog for PortService<R> {
  async fn get_by_code(&self, code: &str) -> Result<Port, ServiceError> {
    Self::validate_code(code)?;
    Ok(self.repo.find(code).await?)
  }

  #[instrument(skip(self, port), fields(port_code = %port.port_code))]
  async fn create_or_update(&self, port: Port) -> Result<UpsertOutcome, ServiceError> {
    Self::validate_code(&port.port_code)?;

    match self.repo.find(&port.port_code).await {
      Err(RepositoryError::NotFound) => {
        self.repo.create(&port).await?;
        debug!("Port created");
        Ok(UpsertOutcome::Created)
      }
      Ok(_) => {
        self.repo.update(&port).await?;
        debug!("Port updated");
        Ok(UpsertOutcome::Updated)
      }
      Err(e) => Err(e.into()),
    }
  }

  #[instrument(skip(self, ports), fields(count = ports.len()))]
  async fn create_or_update_many(&self, ports: Vec<Port>) -> Result<BatchSummary, ServiceError> {
    let total = ports.len();
    let results = join_all(ports.into_iter().map(|port| self.create_or_update(port))).await;

    let mut summary = BatchSummary::default();
    let mut failed = 0;
    let mut first = None;

    for result in results {
      match result {
        Ok(UpsertOutcome::Created) => summary.created += 1,
        Ok(UpsertOutcome::Updated) => summary.updated += 1,
        Err(e) => {
          failed += 1;
          first.get_or_insert(e);
        }
      }
    }

    if let Some(first) = first {
      warn!(failed, total, error = %first, "Bulk upsert partially failed");
      return Err(ServiceError::Batch {
        failed,
        total,
        first: Box::new(first),
      });
    }

    info!(
      created = summary.created,
      updated = summary.updated,
      "Bulk upsert complete"
    );
    Ok(summary)
  }

  async fn is_healthy(&self) -> bool {
    self.repo.is_healthy().await
  }
}
