//! Shared response data
//!
//! Per-endpoint response shapes live next to their façade; this module only
//! holds what every response carries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scalar;

/// Metadata present under `root` on every response. Not every endpoint fills
/// every field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Echo of the request URL (CDATA on the wire)
    #[serde(default, deserialize_with = "scalar::cdata")]
    pub uri: String,

    /// Response date, `mm/dd/yyyy`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Response time, e.g. `04:24:03 PM PDT`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Free-form message. An empty string on most successful responses;
    /// sometimes an object carrying a warning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
}

impl ResponseMetadata {
    /// Human-readable warning attached to the response, if any
    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        self.message.as_ref()?.get("warning")?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_full() {
        let json = r##"{
            "@id": "1",
            "uri": { "#cdata-section": "http://api.bart.gov/api/etd.aspx?cmd=etd&orig=ROCK&json=y" },
            "date": "05/09/2024",
            "time": "04:24:03 PM PDT",
            "message": ""
        }"##;
        let meta: ResponseMetadata = serde_json::from_str(json).unwrap();
        assert!(meta.uri.contains("cmd=etd"));
        assert_eq!(meta.date.as_deref(), Some("05/09/2024"));
        assert_eq!(meta.time.as_deref(), Some("04:24:03 PM PDT"));
        assert_eq!(meta.message, Some(Value::String(String::new())));
        assert!(meta.warning().is_none());
    }

    #[test]
    fn test_metadata_empty() {
        let meta: ResponseMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(meta, ResponseMetadata::default());
    }

    #[test]
    fn test_metadata_warning() {
        let json = r#"{ "message": { "warning": "No data matched your criteria." } }"#;
        let meta: ResponseMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.warning(), Some("No data matched your criteria."));
    }
}
