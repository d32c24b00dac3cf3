pub mod components;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod schema;
pub mod spec;

use serde_json::Value;

use crate::error::ParseError;
pub use spec::SchemaDocument;

/// Parse a document from JSON.
pub fn from_json(input: &str) -> Result<SchemaDocument, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    from_value(value)
}

/// Parse a document from YAML.
pub fn from_yaml(input: &str) -> Result<SchemaDocument, ParseError> {
    let value: Value = serde_yaml_ng::from_str(input)?;
    from_value(value)
}

/// Build a document from an already-parsed tree.
///
/// Only `info` (with `title` and `version`) and `paths` are required;
/// `components.schemas` may be absent.
pub fn from_value(value: Value) -> Result<SchemaDocument, ParseError> {
    let root = value.as_object().ok_or(ParseError::NotAnObject)?;

    let info = root
        .get("info")
        .ok_or_else(|| ParseError::MissingField("info".to_string()))?;
    for field in ["title", "version"] {
        if info.get(field).is_none() {
            return Err(ParseError::MissingField(format!("info.{field}")));
        }
    }
    if !root.contains_key("paths") {
        return Err(ParseError::MissingField("paths".to_string()));
    }

    serde_json::from_value(value).map_err(|e| ParseError::InvalidStructure(e.to_string()))
}
