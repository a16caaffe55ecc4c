//! Storage Port - Backend-Neutral Record Storage
//!
//! One capability trait every backend implements. Callers hand over a
//! `Filter` and a `Port`; each adapter translates those into its own
//! native shape (map key, filter document, `$set` update) internally.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Port, PORT_CODE_FIELD};

/// Errors surfaced by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
  /// No record matches the filter.
  #[error("record not found")]
  NotFound,
  /// The filter lacks what this backend needs to address a record.
  #[error("invalid filter: {0}")]
  InvalidFilter(String),
  /// A stored record could not be decoded into a `Port`.
  #[error("failed to decode stored record: {0}")]
  Decode(String),
  /// Network, driver or server-side failure.
  #[error("backend failure: {0}")]
  Backend(String),
}

impl StorageError {
  /// Whether this is the "no record at this key" signal.
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound)
  }
}

/// Field-equality filter (`field -> expected value`).
///
/// Ordered so that serialized filter documents are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
  fields: BTreeMap<String, String>,
}

impl Filter {
  /// Empty filter.
  pub fn new() -> Self {
    Self::default()
  }

  /// Filter matching a single port code.
  pub fn by_port_code(code: &str) -> Self {
    Self::new().with(PORT_CODE_FIELD, code)
  }

  /// Add an equality condition.
  pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
    self.fields.insert(field.into(), value.into());
    self
  }

  /// Expected value for `field`, if constrained.
  pub fn get(&self, field: &str) -> Option<&str> {
    self.fields.get(field).map(String::as_str)
  }

  /// The port code this filter addresses, if any.
  pub fn port_code(&self) -> Option<&str> {
    self.get(PORT_CODE_FIELD)
  }

  /// Iterate conditions in field order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }
}

/// Trait for port storage backends.
///
/// `update` takes the same `Filter` shape as `find`; how a filter selects
/// the record to replace is the backend's business. An update replaces the
/// whole record, never merges.
#[async_trait]
pub trait Storage: Send + Sync + 'static {
  /// Short backend name used in logs and aggregated errors.
  fn name(&self) -> &'static str;

  /// Look up one record. Absence is `StorageError::NotFound`.
  async fn find(&self, filter: &Filter) -> Result<Port, StorageError>;

  /// Store a record under its `port_code`, overwriting any previous one.
  async fn insert(&self, port: &Port) -> Result<(), StorageError>;

  /// Replace the record selected by `filter` with `port`.
  async fn update(&self, filter: &Filter, port: &Port) -> Result<(), StorageError>;

  /// Check whether the backend is reachable.
  async fn is_healthy(&self) -> bool;
}
