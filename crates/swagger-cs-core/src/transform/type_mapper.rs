use indexmap::IndexSet;

use crate::ir::IrType;

use super::name_normalizer::capitalize_first;

/// Map a schema `type` token to an `IrType`.
///
/// A dotted token is read as `Namespace.TypeName` from its last two segments
/// and takes priority over the primitive table. Unknown tokens, `object`,
/// `number` and a missing token all become `IrType::Any`.
pub fn map_type_token(token: Option<&str>) -> IrType {
    let Some(token) = token else {
        return IrType::Any;
    };

    if let Some(qualified) = qualified_type(token) {
        return qualified;
    }

    match token {
        "integer" => IrType::Integer,
        "string" => IrType::String,
        "boolean" => IrType::Boolean,
        "array" => IrType::List,
        _ => IrType::Any,
    }
}

/// Resolve the final segment of a `$ref`.
///
/// Dotted names are qualified as in [`map_type_token`]; names of component
/// schemas that get a model become `IrType::Ref`; anything else goes through
/// the primitive table.
pub fn resolve_ref_token(token: &str, known_schemas: &IndexSet<String>) -> IrType {
    if let Some(qualified) = qualified_type(token) {
        return qualified;
    }
    if known_schemas.contains(token) {
        return IrType::Ref(token.to_string());
    }
    map_type_token(Some(token))
}

fn qualified_type(token: &str) -> Option<IrType> {
    if !token.contains('.') {
        return None;
    }
    let mut segments = token.rsplit('.');
    let name = segments.next().unwrap_or_default();
    let namespace = segments.next().unwrap_or_default();
    Some(IrType::Qualified {
        namespace: capitalize_first(namespace),
        name: capitalize_first(name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives() {
        assert_eq!(map_type_token(Some("integer")), IrType::Integer);
        assert_eq!(map_type_token(Some("string")), IrType::String);
        assert_eq!(map_type_token(Some("boolean")), IrType::Boolean);
        assert_eq!(map_type_token(Some("array")), IrType::List);
    }

    #[test]
    fn test_fallthrough() {
        assert_eq!(map_type_token(Some("object")), IrType::Any);
        assert_eq!(map_type_token(Some("number")), IrType::Any);
        assert_eq!(map_type_token(Some("Pet")), IrType::Any);
        assert_eq!(map_type_token(None), IrType::Any);
    }

    #[test]
    fn test_dotted_token() {
        assert_eq!(
            map_type_token(Some("com.acme.billing.invoice")),
            IrType::Qualified {
                namespace: "Billing".to_string(),
                name: "Invoice".to_string(),
            }
        );
        assert_eq!(
            map_type_token(Some("System.DateTime")),
            IrType::Qualified {
                namespace: "System".to_string(),
                name: "DateTime".to_string(),
            }
        );
    }

    #[test]
    fn test_dotted_token_beats_table() {
        assert_eq!(
            map_type_token(Some("my.integer")),
            IrType::Qualified {
                namespace: "My".to_string(),
                name: "Integer".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_ref_token() {
        let known: IndexSet<String> = ["Pet".to_string()].into_iter().collect();
        assert_eq!(resolve_ref_token("Pet", &known), IrType::Ref("Pet".to_string()));
        assert_eq!(resolve_ref_token("Owner", &known), IrType::Any);
        assert_eq!(resolve_ref_token("string", &known), IrType::String);
        assert_eq!(
            resolve_ref_token("Shop.Pet", &known),
            IrType::Qualified {
                namespace: "Shop".to_string(),
                name: "Pet".to_string(),
            }
        );
    }
}
