use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Components object. Schemas stay raw so a malformed entry can be skipped
/// on its own instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<IndexMap<String, Value>>,
}
