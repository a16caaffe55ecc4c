//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates the persistence ports to implement the catalog
//! workflows offered to the HTTP layer through `PortCatalog`.

pub mod port_service;

pub use port_service::PortService;
