//! Domain layer - Catalog entities.
//!
//! Inner ring of the hexagon: plain serializable types with no
//! knowledge of storage backends or HTTP.

pub mod port;

pub use port::{Port, PortCode, PORT_CODE_FIELD};
