use serde::{Deserialize, Serialize};

use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;

/// An API operation. Responses are not read: every generated method returns
/// the untyped placeholder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterOrRef>>,

    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_fields() {
        let op: Operation = serde_json::from_str(
            r##"{
                "operationId": "listPets",
                "summary": "List pets",
                "parameters": [{"name": "limit", "in": "query"}],
                "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}}},
                "responses": {"200": {"description": "ok"}}
            }"##,
        )
        .unwrap();
        assert_eq!(op.summary.as_deref(), Some("List pets"));
        assert_eq!(op.parameters.as_ref().map(Vec::len), Some(1));
        assert!(op.request_body.is_some());
    }

    #[test]
    fn test_empty_operation() {
        let op: Operation = serde_json::from_str("{}").unwrap();
        assert_eq!(op, Operation::default());
    }
}
