//! In-Memory Storage - `Storage` Adapter over the Key-Value Store
//!
//! Translates filters into map keys: the `port_code` condition is the key,
//! every other condition is ignored. Nothing survives a restart.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::key_value::KeyValueStore;
use crate::domain::Port;
use crate::ports::storage::{Filter, Storage, StorageError};

/// Process-local port storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    store: Arc<KeyValueStore<Port>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ports currently held.
    pub async fn len(&self) -> usize {
        self.store.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.store.is_empty().await
    }

    fn key<'a>(filter: &'a Filter) -> Result<&'a str, StorageError> {
        filter.port_code().ok_or_else(|| {
            StorageError::InvalidFilter("in-memory lookup requires a `port_code` condition".to_string())
        })
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn find(&self, filter: &Filter) -> Result<Port, StorageError> {
        let key = Self::key(filter)?;
        self.store.find(key).await.ok_or(StorageError::NotFound)
    }

    #[instrument(skip(self, port), fields(port_code = %port.port_code))]
    async fn insert(&self, port: &Port) -> Result<(), StorageError> {
        if self.store.insert(port.port_code.clone(), port.clone()).await.is_some() {
            debug!("Existing in-memory port overwritten on insert");
        }
        Ok(())
    }

    async fn update(&self, filter: &Filter, port: &Port) -> Result<(), StorageError> {
        let key = Self::key(filter)?;
        self.store.update(key, port.clone()).await;
        Ok(())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(code: &str, name: &str) -> Port {
        Port {
            name: name.to_string(),
            ..Port::with_code(code)
        }
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let storage = InMemoryStorage::new();
        let p = port("AEJEA", "Jebel Ali");
        storage.insert(&p).await.unwrap();

        let found = storage.find(&Filter::by_port_code("AEJEA")).await.unwrap();
        assert_eq!(found, p);
    }

    #[tokio::test]
    async fn test_find_unknown_is_not_found() {
        let storage = InMemoryStorage::new();
        let err = storage.find(&Filter::by_port_code("ZZZZZ")).await.unwrap_err();
        assert_eq!(err, StorageError::NotFound);
    }

    #[tokio::test]
    async fn test_update_is_full_replace() {
        let storage = InMemoryStorage::new();
        let mut first = port("AEJEA", "Jebel Ali");
        first.alias = vec!["Mina Jebel Ali".to_string()];
        storage.insert(&first).await.unwrap();

        let second = port("AEJEA", "Jebel Ali Port");
        storage.update(&Filter::by_port_code("AEJEA"), &second).await.unwrap();

        let found = storage.find(&Filter::by_port_code("AEJEA")).await.unwrap();
        assert_eq!(found, second);
        assert!(found.alias.is_empty());
    }

    #[tokio::test]
    async fn test_filter_without_code_is_rejected() {
        let storage = InMemoryStorage::new();
        let filter = Filter::new().with("city", "Dubai");

        assert!(matches!(
            storage.find(&filter).await,
            Err(StorageError::InvalidFilter(_))
        ));
        assert!(matches!(
            storage.update(&filter, &port("AEJEA", "x")).await,
            Err(StorageError::InvalidFilter(_))
        ));
        assert!(storage.is_empty().await);
    }
}
