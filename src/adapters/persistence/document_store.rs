//! Document Storage - `Storage` Adapter over a Remote Document Collection
//!
//! Owns every document-database specific shape: filters become filter
//! documents, updates become `{"$set": <all attributes>}` so the stored
//! record is fully replaced. An update that matches nothing inserts the
//! record instead, so a collection that missed an earlier write is
//! brought back in step by the next upload of that code.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::domain::Port;
use crate::ports::document::{Document, DocumentCollection};
use crate::ports::storage::{Filter, Storage, StorageError};

/// Port storage backed by a document collection.
pub struct DocumentStorage {
    /// Remote collection client.
    collection: Arc<dyn DocumentCollection>,
}

impl DocumentStorage {
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self { collection }
    }

    /// Filter document with one string equality per condition.
    pub fn filter_document(filter: &Filter) -> Document {
        filter
            .iter()
            .map(|(field, value)| (field.to_string(), Value::String(value.to_string())))
            .collect()
    }

    /// Update document replacing every attribute of the stored port.
    pub fn update_document(port: &Port) -> Document {
        let mut update = Document::new();
        update.insert("$set".to_string(), Value::Object(port.attributes()));
        update
    }

    fn backend_error(err: &anyhow::Error) -> StorageError {
        StorageError::Backend(format!("{err:#}"))
    }
}

#[async_trait]
impl Storage for DocumentStorage {
    fn name(&self) -> &'static str {
        "document"
    }

    #[instrument(skip(self, filter))]
    async fn find(&self, filter: &Filter) -> Result<Port, StorageError> {
        if filter.is_empty() {
            return Err(StorageError::InvalidFilter(
                "refusing an empty filter on a document lookup".to_string(),
            ));
        }

        let found = self
            .collection
            .find_one(&Self::filter_document(filter))
            .await
            .map_err(|e| {
                warn!(error = %e, "Document lookup failed");
                Self::backend_error(&e)
            })?;

        let document = found.ok_or(StorageError::NotFound)?;
        serde_json::from_value(Value::Object(document)).map_err(|e| StorageError::Decode(e.to_string()))
    }

    #[instrument(skip(self, port), fields(port_code = %port.port_code))]
    async fn insert(&self, port: &Port) -> Result<(), StorageError> {
        self
            .collection
            .insert_one(&port.to_document())
            .await
            .map_err(|e| {
                warn!(error = %e, "Document insert failed");
                Self::backend_error(&e)
            })
    }

    #[instrument(skip(self, filter, port), fields(port_code = %port.port_code))]
    async fn update(&self, filter: &Filter, port: &Port) -> Result<(), StorageError> {
        if filter.is_empty() {
            return Err(StorageError::InvalidFilter(
                "refusing an empty filter on a document update".to_string(),
            ));
        }

        let result = self
            .collection
            .update_one(&Self::filter_document(filter), &Self::update_document(port))
            .await
            .map_err(|e| {
                warn!(error = %e, "Document update failed");
                Self::backend_error(&e)
            })?;

        if result.matched == 0 {
            debug!("No stored document matched, inserting");
            return self.insert(port).await;
        }
        Ok(())
    }

    async fn is_healthy(&self) -> bool {
        self.collection.ping().await
    }
}
