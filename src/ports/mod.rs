//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires from
//! the outside world, and the one it offers to the HTTP layer.
//!
//! Port categories:
//! - `Storage`: backend-neutral record storage (in-memory, document store)
//! - `DocumentCollection`: the external document database
//! - `PortRepository`: domain persistence over one or two storages
//! - `PortCatalog`: inbound use-case interface for the HTTP adapter

pub mod catalog;
pub mod document;
pub mod repository;
pub mod storage;
