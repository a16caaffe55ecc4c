//! Port record: the single catalog entity.
//!
//! A `Port` is a flat, self-contained shipping-port reference keyed by
//! its externally assigned `port_code`. Nothing here knows about storage
//! backends; the document form is plain JSON built from serde.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Externally assigned port identifier (UN/LOCODE style, e.g. `AEJEA`).
pub type PortCode = String;

/// Field name every backend keys records on.
pub const PORT_CODE_FIELD: &str = "port_code";

/// A shipping-port reference record.
///
/// Sequences keep their input order and may contain duplicates.
/// `coordinates` is `[longitude, latitude, ...]` and is not validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Port {
    pub port_code: PortCode,
    pub name: String,
    pub city: String,
    pub country: String,
    pub code: String,
    pub alias: Vec<String>,
    pub regions: Vec<String>,
    pub coordinates: Vec<f64>,
    pub province: String,
    pub timezone: String,
    pub unlocs: Vec<String>,
}

impl Port {
    /// Create an otherwise empty port with the given code.
    pub fn with_code(port_code: impl Into<PortCode>) -> Self {
        Self {
            port_code: port_code.into(),
            ..Self::default()
        }
    }

    /// Whether the record can be persisted (backends key on `port_code`).
    pub fn has_code(&self) -> bool {
        !self.port_code.trim().is_empty()
    }

    /// Full document form, `port_code` included.
    pub fn to_document(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // A struct of strings, string lists and floats always serializes to
            // an object; non-finite coordinates become `null` rather than failing.
            _ => Map::new(),
        }
    }

    /// Every attribute except the key, used as a whole-record replacement set.
    pub fn attributes(&self) -> Map<String, Value> {
        let mut doc = self.to_document();
        doc.remove(PORT_CODE_FIELD);
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jebel_ali() -> Port {
        Port {
            port_code: "AEJEA".to_string(),
            name: "Jebel Ali".to_string(),
            city: "Jebel Ali".to_string(),
            country: "United Arab Emirates".to_string(),
            code: "52051".to_string(),
            coordinates: vec![55.027_737_4, 24.985_927_4],
            province: "Dubai".to_string(),
            timezone: "Asia/Dubai".to_string(),
            unlocs: vec!["AEJEA".to_string()],
            ..Port::default()
        }
    }

    #[test]
    fn test_attributes_exclude_port_code() {
        let attrs = jebel_ali().attributes();
        assert!(!attrs.contains_key(PORT_CODE_FIELD));
        assert_eq!(attrs["code"], "52051");
        // Empty sequences are still part of the replacement set.
        assert_eq!(attrs["alias"], Value::Array(vec![]));
    }

    #[test]
    fn test_document_round_trips_through_serde() {
        let port = jebel_ali();
        let doc = Value::Object(port.to_document());
        let back: Port = serde_json::from_value(doc).unwrap();
        assert_eq!(back, port);
    }

    #[test]
    fn test_missing_fields_default() {
        let port: Port = serde_json::from_str(r#"{"port_code":"ZWUTA"}"#).unwrap();
        assert_eq!(port, Port::with_code("ZWUTA"));
    }

    #[test]
    fn test_blank_code_is_not_persistable() {
        assert!(!Port::with_code("  ").has_code());
        assert!(Port::with_code("AEJEA").has_code());
    }
}
