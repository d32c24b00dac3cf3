use indexmap::IndexSet;
use log::debug;
use serde_json::Value;

use crate::diagnostics::Diagnostic;
use crate::ir::*;
use crate::parse::operation::Operation;
use crate::parse::parameter::{Parameter, ParameterOrRef};
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::schema::Schema;
use crate::parse::spec::{PathItem, SchemaDocument};

use super::name_normalizer::{
    capitalize_first, client_class_name, is_identifier, operation_name, output_dir_name,
    parameter_identifier,
};
use super::type_mapper::{map_type_token, resolve_ref_token};

/// Path item keys that are not operations and carry nothing to generate.
const IGNORED_PATH_KEYS: &[&str] = &["summary", "description", "servers", "$ref"];

/// Lower a parsed document into the IR.
///
/// Lowering never fails: anything that cannot be generated is skipped or
/// degraded to the untyped placeholder and reported in `IrSpec::diagnostics`.
pub fn transform(doc: &SchemaDocument) -> IrSpec {
    let mut diagnostics = Vec::new();

    // Phase 1: Parse component schemas and find the ones that become models
    let parsed = parse_schemas(doc, &mut diagnostics);
    let known_schemas: IndexSet<String> = parsed
        .iter()
        .filter(|(_, schema)| schema.enum_values.is_some() || schema.properties.is_some())
        .map(|(name, _)| name.clone())
        .collect();

    // Phase 2: Lower schemas to models
    let schemas: Vec<IrSchema> = parsed
        .iter()
        .filter_map(|(name, schema)| lower_schema(name, schema, &known_schemas, &mut diagnostics))
        .collect();

    // Phase 3: Lower operations
    let operations = resolve_operations(doc, &known_schemas, &mut diagnostics);

    // Phase 4: Build IR info
    let info = IrInfo {
        title: doc.info.title.clone(),
        description: doc.info.description.clone(),
        client_class_name: client_class_name(&doc.info.title, &doc.info.version),
        output_dir: output_dir_name(&doc.info.title),
    };

    debug!(
        "lowered {} operations, {} schemas, {} diagnostics",
        operations.len(),
        schemas.len(),
        diagnostics.len()
    );

    IrSpec {
        info,
        schemas,
        operations,
        diagnostics,
    }
}

fn parse_schemas(doc: &SchemaDocument, diagnostics: &mut Vec<Diagnostic>) -> Vec<(String, Schema)> {
    doc.schemas()
        .filter_map(|(name, raw)| {
            let location = format!("components.schemas.{name}");
            // The name becomes both a type name and a file name.
            if !is_identifier(name) {
                diagnostics.push(Diagnostic::warning(
                    location,
                    "schema name is not a valid identifier; skipped",
                ));
                return None;
            }
            if !raw.is_object() {
                diagnostics.push(Diagnostic::warning(location, "schema is not an object; skipped"));
                return None;
            }
            match serde_json::from_value::<Schema>(raw.clone()) {
                Ok(schema) => Some((name.clone(), schema)),
                Err(e) => {
                    diagnostics.push(Diagnostic::warning(
                        location,
                        format!("unreadable schema ({e}); skipped"),
                    ));
                    None
                }
            }
        })
        .collect()
}

fn lower_schema(
    name: &str,
    schema: &Schema,
    known_schemas: &IndexSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<IrSchema> {
    let location = format!("components.schemas.{name}");

    if let Some(ref values) = schema.enum_values {
        let members: Vec<String> = values.iter().map(enum_member).collect();
        for member in members.iter().filter(|m| !is_identifier(m)) {
            diagnostics.push(Diagnostic::warning(
                &location,
                format!("enum member `{member}` is not a valid identifier"),
            ));
        }
        return Some(IrSchema::Enum(IrEnumSchema {
            name: name.to_string(),
            description: schema.description.clone(),
            members,
        }));
    }

    if let Some(ref properties) = schema.properties {
        let fields = properties
            .iter()
            .flatten()
            .map(|(key, raw)| IrField {
                name: capitalize_first(key),
                original_name: key.clone(),
                field_type: property_type(
                    &format!("{location}.properties.{key}"),
                    raw,
                    known_schemas,
                    diagnostics,
                ),
            })
            .collect();
        return Some(IrSchema::Record(IrRecordSchema {
            name: name.to_string(),
            description: schema.description.clone(),
            fields,
        }));
    }

    diagnostics.push(Diagnostic::warning(
        location,
        "schema has neither `enum` nor `properties`; no model generated",
    ));
    None
}

fn enum_member(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn property_type(
    location: &str,
    raw: &Value,
    known_schemas: &IndexSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> IrType {
    match serde_json::from_value::<Schema>(raw.clone()) {
        Ok(property) => match property.ref_name() {
            Some(token) => resolve_ref_token(token, known_schemas),
            None => map_type_token(property.type_token()),
        },
        Err(_) => {
            diagnostics.push(Diagnostic::warning(
                location,
                "property is not a schema object; typed as placeholder",
            ));
            IrType::Any
        }
    }
}

fn resolve_operations(
    doc: &SchemaDocument,
    known_schemas: &IndexSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<IrOperation> {
    let mut operations = Vec::new();
    let mut used_names = IndexSet::new();

    for (path, item) in &doc.paths {
        let path_params = path_level_parameters(path, item, known_schemas, diagnostics);

        for (key, raw) in item.iter() {
            let location = format!("paths.{path}.{key}");
            let Ok(method) = key.parse::<HttpMethod>() else {
                if key != "parameters"
                    && !key.starts_with("x-")
                    && !IGNORED_PATH_KEYS.contains(&key.as_str())
                {
                    diagnostics.push(Diagnostic::warning(
                        location,
                        "unknown path item key; ignored",
                    ));
                }
                continue;
            };

            let op = match serde_json::from_value::<Operation>(raw.clone()) {
                Ok(op) => op,
                Err(e) => {
                    diagnostics.push(Diagnostic::warning(
                        location,
                        format!("unreadable operation ({e}); skipped"),
                    ));
                    continue;
                }
            };

            let name = unique_name(
                operation_name(path, key),
                &mut used_names,
                &location,
                diagnostics,
            );
            operations.push(build_operation(
                name,
                method,
                path,
                &op,
                &path_params,
                &location,
                known_schemas,
                diagnostics,
            ));
        }
    }

    operations
}

fn path_level_parameters(
    path: &str,
    item: &PathItem,
    known_schemas: &IndexSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<IrParameter> {
    let Some(raw) = item.get("parameters") else {
        return Vec::new();
    };
    let location = format!("paths.{path}.parameters");
    match serde_json::from_value::<Vec<ParameterOrRef>>(raw.clone()) {
        Ok(params) => resolve_parameters(&params, &location, known_schemas, diagnostics),
        Err(e) => {
            diagnostics.push(Diagnostic::warning(
                location,
                format!("unreadable parameters ({e}); ignored"),
            ));
            Vec::new()
        }
    }
}

/// Keep the first use of a name; later collisions get a numeric suffix.
fn unique_name(
    base: String,
    used: &mut IndexSet<String>,
    location: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    if used.insert(base.clone()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}{n}");
        if used.insert(candidate.clone()) {
            diagnostics.push(Diagnostic::warning(
                location,
                format!("name `{base}` already used; renamed to `{candidate}`"),
            ));
            return candidate;
        }
        n += 1;
    }
}

#[allow(clippy::too_many_arguments)]
fn build_operation(
    name: String,
    method: HttpMethod,
    path: &str,
    op: &Operation,
    path_params: &[IrParameter],
    location: &str,
    known_schemas: &IndexSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> IrOperation {
    let own_params = resolve_parameters(
        op.parameters.as_deref().unwrap_or_default(),
        &format!("{location}.parameters"),
        known_schemas,
        diagnostics,
    );
    let mut parameters = merge_parameters(path_params, own_params);

    let request_body = op
        .request_body
        .as_ref()
        .and_then(|body| resolve_request_body(body, location, known_schemas, diagnostics));

    // Parameter identifiers must be unique and must not shadow the body or
    // the request local.
    let mut used = IndexSet::new();
    used.insert(REQUEST_LOCAL.to_string());
    if request_body.is_some() {
        used.insert(REQUEST_BODY_PARAM.to_string());
    }
    for param in &mut parameters {
        param.name = unique_name(
            std::mem::take(&mut param.name),
            &mut used,
            &format!("{location}.parameters.{}", param.original_name),
            diagnostics,
        );
    }

    for placeholder in path_placeholders(path) {
        if !parameters.iter().any(|p| p.original_name == placeholder) {
            diagnostics.push(Diagnostic::warning(
                location,
                format!("path placeholder `{{{placeholder}}}` has no matching parameter"),
            ));
        }
    }

    IrOperation {
        name,
        method,
        path: path.to_string(),
        summary: op.summary.clone(),
        parameters,
        request_body,
        return_type: IrType::Any,
        deprecated: op.deprecated.unwrap_or(false),
    }
}

/// Operation parameters override path-level ones with the same name and location.
fn merge_parameters(path_params: &[IrParameter], own: Vec<IrParameter>) -> Vec<IrParameter> {
    let mut merged = path_params.to_vec();
    for param in own {
        match merged.iter_mut().find(|p| {
            p.original_name == param.original_name && p.location == param.location
        }) {
            Some(existing) => *existing = param,
            None => merged.push(param),
        }
    }
    merged
}

fn resolve_parameters(
    params: &[ParameterOrRef],
    location: &str,
    known_schemas: &IndexSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<IrParameter> {
    params
        .iter()
        .filter_map(|p| match p {
            ParameterOrRef::Parameter(param) => Some(lower_parameter(param, known_schemas)),
            ParameterOrRef::Ref { ref_path } => {
                diagnostics.push(Diagnostic::warning(
                    location,
                    format!("parameter reference `{ref_path}` is not resolved; skipped"),
                ));
                None
            }
        })
        .collect()
}

fn lower_parameter(param: &Parameter, known_schemas: &IndexSet<String>) -> IrParameter {
    let param_type = param
        .schema
        .as_ref()
        .and_then(Schema::ref_name)
        .map(|token| resolve_ref_token(token, known_schemas))
        .unwrap_or(IrType::Any);

    IrParameter {
        name: parameter_identifier(&param.name),
        original_name: param.name.clone(),
        location: param.location.as_deref().map(IrParameterLocation::parse),
        param_type,
    }
}

fn resolve_request_body(
    body: &RequestBodyOrRef,
    location: &str,
    known_schemas: &IndexSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<IrRequestBody> {
    let location = format!("{location}.requestBody");
    match body {
        RequestBodyOrRef::RequestBody(rb) => {
            let Some((content_type, media)) = rb.json_content() else {
                diagnostics.push(Diagnostic::warning(
                    location,
                    "request body has no JSON media type; skipped",
                ));
                return None;
            };

            let body_type = media
                .schema
                .as_ref()
                .and_then(Schema::ref_name)
                .map(|token| resolve_ref_token(token, known_schemas))
                .unwrap_or(IrType::Any);

            Some(IrRequestBody {
                body_type,
                content_type: content_type.clone(),
            })
        }
        RequestBodyOrRef::Ref { ref_path } => {
            diagnostics.push(Diagnostic::warning(
                location,
                format!("request body reference `{ref_path}` is not resolved; skipped"),
            ));
            None
        }
    }
}
