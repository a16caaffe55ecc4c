//! Key-Value Store - Exclusive-Lock In-Process Map
//!
//! Every operation, reads included, holds one mutex over the whole map.
//! Access is fully serialized; at catalog scale (a few thousand ports)
//! this is not a bottleneck.

use std::collections::HashMap;

use tokio::sync::Mutex;

/// String-keyed map of owned records guarded by a single mutex.
#[derive(Debug)]
pub struct KeyValueStore<V> {
    entries: Mutex<HashMap<String, V>>,
}

impl<V: Clone> KeyValueStore<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Clone of the value stored at `key`.
    pub async fn find(&self, key: &str) -> Option<V> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Store `value` at `key`, returning the overwritten value if there was one.
    pub async fn insert(&self, key: impl Into<String>, value: V) -> Option<V> {
        self.entries.lock().await.insert(key.into(), value)
    }

    /// Replace the value at `key`. Behaves like `insert` for an absent key.
    pub async fn update(&self, key: impl Into<String>, value: V) {
        self.entries.lock().await.insert(key.into(), value);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl<V: Clone> Default for KeyValueStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
