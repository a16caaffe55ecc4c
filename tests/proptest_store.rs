//! Property-Based Tests - Storage and Service Invariants
//!
//! Uses `proptest` to check lookup, overwrite and bulk-upsert behaviour
//! over random port records. Async calls run on `tokio_test::block_on`.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::collection::{btree_set, vec};
use proptest::prelude::*;

use port_catalog::adapters::persistence::{CatalogRepository, InMemoryStorage, KeyValueStore};
use port_catalog::domain::Port;
use port_catalog::ports::catalog::PortCatalog;
use port_catalog::ports::storage::{Filter, Storage, StorageError};
use port_catalog::usecases::PortService;

fn port_code() -> impl Strategy<Value = String> {
    "[A-Z]{5}"
}

fn port() -> impl Strategy<Value = Port> {
    (
        port_code(),
        "[A-Za-z ]{0,20}",
        "[A-Za-z ]{0,12}",
        "[0-9]{0,5}",
        vec("[A-Za-z]{1,8}", 0..3),
        vec(-180.0f64..180.0, 0..3),
        vec("[A-Z]{5}", 0..3),
    )
        .prop_map(|(port_code, name, city, code, alias, coordinates, unlocs)| Port {
            port_code,
            name,
            city,
            code,
            alias,
            coordinates,
            unlocs,
            ..Port::default()
        })
}

// ── Key-value store ─────────────────────────────────────────

proptest! {
    /// A key never inserted is never found.
    #[test]
    fn unseen_key_is_absent(keys in btree_set(port_code(), 0..20), probe in port_code()) {
        prop_assume!(!keys.contains(&probe));
        let store = KeyValueStore::new();
        tokio_test::block_on(async {
            for key in &keys {
                store.insert(key.clone(), key.len()).await;
            }
            prop_assert_eq!(store.find(&probe).await, None);
            Ok(())
        })?;
    }
}

// ── In-memory storage adapter ───────────────────────────────

proptest! {
    /// Insert then find returns the record field for field.
    #[test]
    fn insert_then_find_is_identity(p in port()) {
        let storage = InMemoryStorage::new();
        let found = tokio_test::block_on(async {
            storage.insert(&p).await.unwrap();
            storage.find(&Filter::by_port_code(&p.port_code)).await
        });
        prop_assert_eq!(found, Ok(p));
    }

    /// Update fully replaces what insert stored.
    #[test]
    fn update_replaces_insert(first in port(), second in port()) {
        let mut second = second;
        second.port_code = first.port_code.clone();
        let filter = Filter::by_port_code(&first.port_code);

        let storage = InMemoryStorage::new();
        let found = tokio_test::block_on(async {
            storage.insert(&first).await.unwrap();
            storage.update(&filter, &second).await.unwrap();
            storage.find(&filter).await
        });
        prop_assert_eq!(found, Ok(second));
    }

    /// Lookups of codes that were never stored report NotFound.
    #[test]
    fn unknown_code_is_not_found(p in port(), probe in port_code()) {
        prop_assume!(p.port_code != probe);
        let storage = InMemoryStorage::new();
        let found = tokio_test::block_on(async {
            storage.insert(&p).await.unwrap();
            storage.find(&Filter::by_port_code(&probe)).await
        });
        prop_assert_eq!(found, Err(StorageError::NotFound));
    }
}

// ── Service bulk upsert ─────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every record of a bulk upload with distinct codes is retrievable afterwards.
    #[test]
    fn bulk_upsert_stores_every_record(ports in vec(port(), 0..40)) {
        let mut seen = BTreeSet::new();
        let ports: Vec<Port> = ports
            .into_iter()
            .filter(|p| seen.insert(p.port_code.clone()))
            .collect();

        let storage = Arc::new(InMemoryStorage::new());
        let repo = CatalogRepository::local_only(storage.clone());
        let service = PortService::new(Arc::new(repo));

        tokio_test::block_on(async {
            let summary = service.create_or_update_many(ports.clone()).await.unwrap();
            prop_assert_eq!(summary.created, ports.len());
            prop_assert_eq!(storage.len().await, ports.len());

            for p in &ports {
                prop_assert_eq!(&service.get_by_code(&p.port_code).await.unwrap(), p);
            }
            Ok(())
        })?;
    }
}
