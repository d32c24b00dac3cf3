use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::components::Components;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A path item. Entries stay raw so that verb order matches the document;
/// `transform` decides which keys are operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathItem {
    pub entries: IndexMap<String, Value>,
}

impl PathItem {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

/// Top-level OpenAPI/Swagger document, reduced to what generation reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openapi: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger: Option<String>,

    pub info: Info,

    pub paths: IndexMap<String, PathItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
}

impl SchemaDocument {
    /// Component schemas in document order, empty when the section is absent.
    pub fn schemas(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.components
            .iter()
            .filter_map(|c| c.schemas.as_ref())
            .flat_map(|s| s.iter())
    }
}
