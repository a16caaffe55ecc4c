//! Persistence Adapters - Storage Backends and the Catalog Repository
//!
//! Implements the `Storage` port twice (process-local map, remote
//! document collection) and the `PortRepository` port on top of them.

pub mod data_api;
pub mod document_store;
pub mod in_memory;
pub mod key_value;
pub mod repository_impl;

pub use data_api::{DataApiCollection, DataApiConfig};
pub use document_store::DocumentStorage;
pub use in_memory::InMemoryStorage;
pub use key_value::KeyValueStore;
pub use repository_impl::CatalogRepository;
