//! Configuration Module - TOML-based Service Configuration
//!
//! Loads configuration from `config.toml` with environment variable
//! overrides for the listening port and the document store connection.
//! Every section has defaults, so an absent file yields a local-only
//! service on port 8080.

pub mod loader;

use serde::Deserialize;

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// HTTP listener and logging.
  pub server: ServerConfig,
  /// Storage backends.
  pub storage: StorageConfig,
  /// Metrics and monitoring.
  pub metrics: MetricsConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  /// Interface to bind.
  pub bind_address: String,
  /// Listening port.
  pub port: u16,
  /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
  pub log_level: String,
  /// Largest accepted upload body in bytes.
  pub max_upload_bytes: usize,
  /// Seconds to wait for in-flight requests on shutdown.
  pub shutdown_grace_seconds: u64,
}

/// Storage backend selection.
///
/// The document store is wired only when both its URL and database
/// name are set; otherwise the service runs on the in-memory map alone.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
  /// Keep a process-local copy (preferred for reads).
  pub local: bool,
  /// Remote document store connection.
  pub document: DocumentStoreConfig,
}

/// Remote document store (Data API) connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentStoreConfig {
  /// Data API base URL.
  pub url: String,
  /// Database name.
  pub database: String,
  /// Collection holding port documents.
  pub collection: String,
  /// Data source (cluster) name.
  pub data_source: String,
  /// API key, if the endpoint requires one.
  pub api_key: Option<String>,
  /// Per-request timeout in milliseconds.
  pub timeout_ms: u64,
  /// Maximum concurrent requests to the store.
  pub max_concurrent: usize,
}

/// Metrics and monitoring configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
  /// Expose `/metrics`.
  pub enabled: bool,
}

impl StorageConfig {
  /// The document store settings, if the store is configured.
  pub fn document_store(&self) -> Option<&DocumentStoreConfig> {
    self.document.is_configured().then_some(&self.document)
  }
}

impl DocumentStoreConfig {
  pub fn is_configured(&self) -> bool {
    !self.url.trim().is_empty() && !self.database.trim().is_empty()
  }
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      bind_address: "0.0.0.0".to_string(),
      port: 8080,
      log_level: "info".to_string(),
      max_upload_bytes: 16 * 1024 * 1024,
      shutdown_grace_seconds: 3,
    }
  }
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self {
      local: true,
      document: DocumentStoreConfig::default(),
    }
  }
}

impl Default for DocumentStoreConfig {
  fn default() -> Self {
    Self {
      url: String::new(),
      database: String::new(),
      collection: "ports".to_string(),
      data_source: "Cluster0".to_string(),
      api_key: None,
      timeout_ms: 5_000,
      max_concurrent: 16,
    }
  }
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self { enabled: true }
  }
}
