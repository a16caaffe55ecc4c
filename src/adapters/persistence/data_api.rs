//! Data API Collection - HTTP Client for a Remote Document Collection
//!
//! Implements `DocumentCollection` against a JSON-over-HTTP data API
//! (`POST {base_url}/action/{findOne|insertOne|updateOne}`). The remote
//! store governs its own consistency; this client only bounds its own
//! in-flight requests and applies a per-request timeout. No retries.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::config::DocumentStoreConfig;
use crate::ports::document::{Document, DocumentCollection, UpdateResult};

/// Connection settings for one collection.
#[derive(Debug, Clone)]
pub struct DataApiConfig {
    /// Base URL of the data API (no trailing `/action`).
    pub base_url: String,
    /// Optional API key sent as the `api-key` header.
    pub api_key: Option<String>,
    /// Cluster / data source name.
    pub data_source: String,
    /// Database name.
    pub database: String,
    /// Collection name.
    pub collection: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum concurrent requests.
    pub max_concurrent: usize,
}

impl From<&DocumentStoreConfig> for DataApiConfig {
    fn from(config: &DocumentStoreConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            data_source: config.data_source.clone(),
            database: config.database.clone(),
            collection: config.collection.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
            max_concurrent: config.max_concurrent,
        }
    }
}

/// Request body shared by every action.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionRequest<'a> {
    data_source: &'a str,
    database: &'a str,
    collection: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<&'a Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    update: Option<&'a Document>,
}

#[derive(Debug, Deserialize)]
struct FindOneResponse {
    document: Option<Document>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateOneResponse {
    matched_count: u64,
    modified_count: u64,
}

/// Data API client bound to a single collection.
pub struct DataApiCollection {
    /// Underlying HTTP client.
    http: Client,
    /// Collection coordinates.
    config: DataApiConfig,
    /// Concurrency limiter.
    semaphore: Arc<Semaphore>,
}

impl DataApiCollection {
    /// Create a new client. Does not contact the server.
    pub fn new(config: DataApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(5)
            .build()
            .context("Failed to build HTTP client")?;

        let semaphore = Arc::new(Semaphore::new(config.max_concurrent.max(1)));

        Ok(Self {
            http,
            config,
            semaphore,
        })
    }

    fn request<'a>(&'a self) -> ActionRequest<'a> {
        ActionRequest {
            data_source: &self.config.data_source,
            database: &self.config.database,
            collection: &self.config.collection,
            filter: None,
            document: None,
            update: None,
        }
    }

    /// POST one action and decode the JSON reply.
    async fn call<T: for<'de> Deserialize<'de>>(
        &self,
        action: &str,
        body: &ActionRequest<'_>,
    ) -> Result<T> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .context("Semaphore closed")?;

        let url = format!("{}/action/{action}", self.config.base_url);
        let mut req = self.http.post(&url).json(body);
        if let Some(key) = &self.config.api_key {
            req = req.header("api-key", key);
        }

        debug!(action, collection = %self.config.collection, "Data API request");

        let response = req
            .send()
            .await
            .with_context(|| format!("Data API {action} request failed"))?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => response
                .json::<T>()
                .await
                .with_context(|| format!("Failed to decode Data API {action} response")),
            status => {
                let text = response.text().await.unwrap_or_default();
                warn!(action, status = %status, "Data API returned an error");
                Err(anyhow::anyhow!("Data API error {status}: {text}"))
            }
        }
    }
}

#[async_trait]
impl DocumentCollection for DataApiCollection {
    async fn find_one(&self, filter: &Document) -> Result<Option<Document>> {
        let body = ActionRequest {
            filter: Some(filter),
            ..self.request()
        };
        let reply: FindOneResponse = self.call("findOne", &body).await?;
        Ok(reply.document)
    }

    async fn insert_one(&self, document: &Document) -> Result<()> {
        let body = ActionRequest {
            document: Some(document),
            ..self.request()
        };
        let _: serde_json::Value = self.call("insertOne", &body).await?;
        Ok(())
    }

    async fn update_one(&self, filter: &Document, update: &Document) -> Result<UpdateResult> {
        let body = ActionRequest {
            filter: Some(filter),
            update: Some(update),
            ..self.request()
        };
        let reply: UpdateOneResponse = self.call("updateOne", &body).await?;
        Ok(UpdateResult {
            matched: reply.matched_count,
            modified: reply.modified_count,
        })
    }

    async fn ping(&self) -> bool {
        let empty = Document::new();
        let body = ActionRequest {
            filter: Some(&empty),
            ..self.request()
        };
        self.call::<FindOneResponse>("findOne", &body).await.is_ok()
    }
}
