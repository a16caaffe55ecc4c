//! Configuration Loader - File Loading, Overrides and Validation
//!
//! Handles loading `config.toml`, applying `PORT_CATALOG_*` environment
//! overrides, and validating the result with clear error messages.

use std::path::Path;

use anyhow::{Context, Result};

use super::AppConfig;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "PORT_CATALOG_CONFIG";

const PORT_ENV: &str = "PORT_CATALOG_PORT";
const DOCUMENT_URL_ENV: &str = "PORT_CATALOG_DOCUMENT_URL";
const DOCUMENT_DATABASE_ENV: &str = "PORT_CATALOG_DOCUMENT_DATABASE";
const DOCUMENT_API_KEY_ENV: &str = "PORT_CATALOG_DOCUMENT_API_KEY";

/// Resolve the effective configuration at startup.
///
/// Reads the file if it exists (defaults otherwise), applies process
/// environment overrides, then validates.
///
/// # Errors
/// Returns detailed error if:
/// - The file exists but can't be read or parsed
/// - An override has the wrong shape
/// - Validation rules are violated
pub fn load_from_env() -> Result<AppConfig> {
  let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
  let path = Path::new(&path);

  let mut config = if path.exists() {
    read_config(path)?
  } else {
    AppConfig::default()
  };

  apply_overrides(&mut config, |key| std::env::var(key).ok())?;
  validate_config(&config)?;
  Ok(config)
}

/// Read and parse a TOML config file, without overrides or validation.
pub fn read_config(path: &Path) -> Result<AppConfig> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
  parse_config(&content)
}

/// Parse TOML content into an `AppConfig`.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  toml::from_str(content).with_context(|| "Failed to parse config.toml")
}

/// Apply `PORT_CATALOG_*` overrides using `lookup` to read variables.
pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<()>
where
  F: Fn(&str) -> Option<String>,
{
  if let Some(port) = lookup(PORT_ENV) {
    config.server.port = port
      .trim()
      .parse()
      .with_context(|| format!("{PORT_ENV} must be a port number, got {port:?}"))?;
  }
  if let Some(url) = lookup(DOCUMENT_URL_ENV) {
    config.storage.document.url = url;
  }
  if let Some(database) = lookup(DOCUMENT_DATABASE_ENV) {
    config.storage.document.database = database;
  }
  if let Some(key) = lookup(DOCUMENT_API_KEY_ENV) {
    config.storage.document.api_key = Some(key).filter(|k| !k.is_empty());
  }
  Ok(())
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(config.server.port > 0, "server.port must be non-zero");
  anyhow::ensure!(
    config.server.max_upload_bytes > 0,
    "server.max_upload_bytes must be positive"
  );

  let document = &config.storage.document;
  anyhow::ensure!(
    config.storage.local || document.is_configured(),
    "At least one storage backend must be enabled (storage.local or storage.document)"
  );

  if document.is_configured() {
    anyhow::ensure!(
      document.url.starts_with("http://") || document.url.starts_with("https://"),
      "storage.document.url must be an http(s) URL, got {}",
      document.url
    );
    anyhow::ensure!(
      !document.collection.is_empty(),
      "storage.document.collection must not be empty"
    );
    anyhow::ensure!(
      document.timeout_ms > 0,
      "storage.document.timeout_ms must be positive"
    );
    anyhow::ensure!(
      document.max_concurrent > 0,
      "storage.document.max_concurrent must be positive"
    );
  }

  Ok(())
}
