//! Response envelope decoding
//!
//! Every body goes through two passes. The first pass only looks for an
//! error report and tolerates any shape around it; the second pass decodes the
//! body into the operation's response type. Bodies that are not JSON at all
//! are probed as XML error documents.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::BartError;

/// Outer JSON shape of every response: `{ "root": { ... } }`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    root: T,
}

/// The `root.message.error` value, which the agency emits in several shapes
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RemoteError {
    /// No error reported
    Absent,
    /// `"error": "bad request"`
    Text(String),
    /// `"error": { "text": "...", "details": "..." }`, keys not fixed
    Fields(Map<String, Value>),
    /// Anything else
    Other(Value),
}

impl RemoteError {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::String(text)) => Self::Text(text.clone()),
            Some(Value::Object(fields)) => Self::Fields(fields.clone()),
            Some(other) => Self::Other(other.clone()),
        }
    }

    fn into_result(self) -> Result<(), BartError> {
        match self {
            Self::Absent => Ok(()),
            Self::Text(text) => Err(BartError::Remote(text)),
            Self::Fields(fields) => {
                let mut pairs: Vec<_> = fields.iter().collect();
                pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
                let message = pairs
                    .into_iter()
                    .map(|(key, value)| format!("{key}: {}", display_value(value)))
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(BartError::Remote(message))
            },
            Self::Other(value) => Err(BartError::RemoteUnexpected(display_value(&value))),
        }
    }
}

/// Render a JSON value for an error message, without quotes around strings
fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Element path of the error record in an XML error document
const XML_ERROR_PATH: [&[u8]; 3] = [b"root", b"message", b"error"];

/// `text` and `details` of an XML error record, kept verbatim
#[derive(Debug, Default)]
struct XmlError {
    text: String,
    details: String,
}

impl XmlError {
    /// The field a text node under `path` belongs to, if any
    fn field_at(&mut self, path: &[Vec<u8>]) -> Option<&mut String> {
        let (leaf, parents) = path.split_last()?;
        let on_path = parents.len() == XML_ERROR_PATH.len()
            && parents
                .iter()
                .zip(XML_ERROR_PATH)
                .all(|(name, expected)| name.as_slice() == expected);
        if !on_path {
            return None;
        }
        match leaf.as_slice() {
            b"text" => Some(&mut self.text),
            b"details" => Some(&mut self.details),
            _ => None,
        }
    }
}

/// Walk an XML document and collect `root > message > error > {text, details}`.
///
/// Text nodes are not trimmed.
fn read_xml_error(document: &str) -> Result<XmlError, String> {
    let mut reader = Reader::from_str(document);
    reader.config_mut().trim_text(false);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut has_root = false;
    let mut error = XmlError::default();

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(start) => {
                has_root = true;
                path.push(start.name().as_ref().to_vec());
            },
            Event::Empty(_) => has_root = true,
            Event::End(_) => {
                path.pop();
            },
            Event::Text(text) => {
                if let Some(field) = error.field_at(&path) {
                    field.push_str(&text.unescape().map_err(|e| e.to_string())?);
                }
            },
            Event::CData(data) => {
                if let Some(field) = error.field_at(&path) {
                    field.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    if let Some(open) = path.last() {
        return Err(format!(
            "unexpected end of document inside <{}>",
            String::from_utf8_lossy(open)
        ));
    }
    if !has_root {
        return Err("document has no root element".to_string());
    }
    Ok(error)
}

/// Look for an error report in a JSON document.
///
/// A string-valued `root.message` is how the agency says "no message" on many
/// successful responses, so it passes.
fn probe_json(document: &Value) -> Result<(), BartError> {
    let root = match document {
        Value::Object(fields) => fields.get("root"),
        Value::Null => None,
        other => {
            return Err(BartError::ParseError(format!(
                "expected a JSON object, found {}",
                kind_of(other)
            )));
        },
    };

    let message = match root {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Object(fields)) => fields.get("message"),
        Some(other) => {
            return Err(BartError::ParseError(format!(
                "root: expected an object, found {}",
                kind_of(other)
            )));
        },
    };

    match message {
        None | Some(Value::Null | Value::String(_)) => Ok(()),
        Some(Value::Object(fields)) => RemoteError::from_value(fields.get("error")).into_result(),
        Some(other) => Err(BartError::ParseError(format!(
            "root.message: expected an object, found {}",
            kind_of(other)
        ))),
    }
}

/// Read an XML error document and turn it into the call's failure
fn probe_xml(body: &[u8]) -> BartError {
    let text = match std::str::from_utf8(body) {
        Ok(text) => text,
        Err(e) => return BartError::XmlParseError(e.to_string()),
    };

    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if !text.trim_start().starts_with('<') {
        return BartError::XmlParseError("body is neither JSON nor XML".to_string());
    }

    match read_xml_error(text) {
        Ok(XmlError { text, details }) => BartError::Remote(format!("error: {text}. {details}")),
        Err(e) => BartError::XmlParseError(e),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Check a response body for an error envelope without decoding it further.
///
/// The JSON document is only looked at along `root.message.error`; the XML
/// probe only runs when the body does not parse as JSON.
pub(crate) fn check(body: &[u8]) -> Result<(), BartError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(document) => probe_json(&document),
        Err(e) if e.is_syntax() || e.is_eof() => {
            debug!("Response body is not JSON, probing for an XML error");
            Err(probe_xml(body))
        },
        Err(e) => Err(BartError::ParseError(e.to_string())),
    }
}

/// Decode a full response body into the typed content of `root`
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, BartError> {
    if let Err(err) = check(body) {
        if err.is_remote() {
            warn!(error = %err, "BART API reported an error");
        }
        return Err(err);
    }

    // The error names the field path, e.g. `root.station.etd.estimate.minutes`
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    serde_path_to_error::deserialize::<_, Envelope<T>>(&mut deserializer)
        .map(|envelope| envelope.root)
        .map_err(|e| BartError::ParseError(e.to_string()))
}
