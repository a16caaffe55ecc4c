//! Document Collection Port - External Document Database
//!
//! The document database is an opaque network collaborator. This trait is
//! the whole surface the crate relies on: single-document find, insert and
//! update addressed by JSON filter documents.

use async_trait::async_trait;
use serde_json::{Map, Value};

/// A JSON document (top-level object).
pub type Document = Map<String, Value>;

/// Outcome of an `update_one` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateResult {
  /// Documents matched by the filter.
  pub matched: u64,
  /// Documents actually changed.
  pub modified: u64,
}

/// Trait for a single remote document collection.
#[async_trait]
pub trait DocumentCollection: Send + Sync + 'static {
  /// First document matching `filter`, or `None`.
  async fn find_one(&self, filter: &Document) -> anyhow::Result<Option<Document>>;

  /// Insert a new document.
  async fn insert_one(&self, document: &Document) -> anyhow::Result<()>;

  /// Apply an update document (e.g. `{"$set": {...}}`) to the first match.
  async fn update_one(
    &self,
    filter: &Document,
    update: &Document,
  ) -> anyhow::Result<UpdateResult>;

  /// Check connectivity.
  async fn ping(&self) -> bool;
}
