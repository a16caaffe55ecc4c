//! Request and response shapes for the ports API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Port;

/// Attributes of one port in an upload file, keyed by port code outside.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortAttributes {
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

impl PortAttributes {
    fn into_port(self, port_code: String) -> Port {
        Port {
            port_code,
            name: self.name,
            city: self.city,
            country: self.country,
            code: self.code,
            alias: self.alias,
            regions: self.regions,
            coordinates: self.coordinates,
            province: self.province,
            timezone: self.timezone,
            unlocs: self.unlocs,
        }
    }
}

/// Decode an upload file: a JSON object of `port_code -> attributes`.
///
/// Anything else (an array, a scalar, malformed JSON, attributes of the
/// wrong type) is rejected.
pub fn decode_upload(bytes: &[u8]) -> Result<Vec<Port>, serde_json::Error> {
    let by_code: BTreeMap<String, PortAttributes> = serde_json::from_slice(bytes)?;
    Ok(by_code
        .into_iter()
        .map(|(code, attrs)| attrs.into_port(code))
        .collect())
}

/// A port as returned by `GET /ports/{port_code}`; empty fields are omitted.
#[derive(Debug, Clone, Serialize)]
pub struct PortResponse {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub port_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alias: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coordinates: Vec<f64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub province: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timezone: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unlocs: Vec<String>,
}

impl From<Port> for PortResponse {
    fn from(port: Port) -> Self {
        Self {
            port_code: port.port_code,
            name: port.name,
            city: port.city,
            country: port.country,
            code: port.code,
            alias: port.alias,
            regions: port.regions,
            coordinates: port.coordinates,
            province: port.province,
            timezone: port.timezone,
            unlocs: port.unlocs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_object_of_ports() {
        let body = br#"{
            "AEJEA": {"name": "Jebel Ali", "code": "52051", "coordinates": [55.02, 24.98]},
            "AEAJM": {"name": "Ajman", "alias": [], "unlocs": ["AEAJM"], "extra": true}
        }"#;
        let ports = decode_upload(body).unwrap();

        assert_eq!(ports.len(), 2);
        let jebel_ali = ports.iter().find(|p| p.port_code == "AEJEA").unwrap();
        assert_eq!(jebel_ali.code, "52051");
        assert_eq!(jebel_ali.coordinates, vec![55.02, 24.98]);
    }

    #[test]
    fn test_decode_rejects_array() {
        assert!(decode_upload(br#"[{"name": "Jebel Ali"}]"#).is_err());
    }

    #[test]
    fn test_decode_rejects_wrong_attribute_shape() {
        assert!(decode_upload(br#"{"AEJEA": {"alias": "not-a-list"}}"#).is_err());
        assert!(decode_upload(br#"{"AEJEA": "Jebel Ali"}"#).is_err());
    }

    #[test]
    fn test_response_omits_empty_fields() {
        let port = Port {
            code: "52051".to_string(),
            ..Port::with_code("AEJEA")
        };
        let value = serde_json::to_value(PortResponse::from(port)).unwrap();
        assert_eq!(value, json!({"port_code": "AEJEA", "code": "52051"}));
    }
}
