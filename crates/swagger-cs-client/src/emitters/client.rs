use minijinja::context;
use swagger_cs_core::ir::{IrOperation, IrParameter, IrSpec, REQUEST_BODY_PARAM, REQUEST_LOCAL};

use super::{csharp_identifier, environment};
use crate::error::EmitError;
use crate::type_mapper::ir_type_to_csharp;

/// Emit `{ClientClassName}.cs`: one async method per operation.
pub fn emit_client(ir: &IrSpec) -> Result<String, EmitError> {
    let mut env = environment();
    env.add_template("client.cs.j2", include_str!("../../templates/client.cs.j2"))?;
    let tmpl = env.get_template("client.cs.j2")?;

    let operations: Vec<minijinja::Value> = ir.operations.iter().map(build_operation).collect();

    let rendered = tmpl.render(context! {
        class_name => ir.info.client_class_name.clone(),
        description => ir.info.description.clone(),
        request_local => REQUEST_LOCAL,
        operations => operations,
    })?;
    Ok(rendered)
}

fn build_operation(op: &IrOperation) -> minijinja::Value {
    let return_type = ir_type_to_csharp(&op.return_type);

    let mut params: Vec<String> = op
        .parameters
        .iter()
        .map(|p| {
            format!(
                "{} {}",
                ir_type_to_csharp(&p.param_type),
                csharp_identifier(&p.name)
            )
        })
        .collect();

    if let Some(ref body) = op.request_body {
        params.push(format!(
            "{} {REQUEST_BODY_PARAM}",
            ir_type_to_csharp(&body.body_type)
        ));
    }

    let content_type = op
        .request_body
        .as_ref()
        .map(|body| media_type_essence(&body.content_type).to_string());

    context! {
        method_name => format!("{}Async", op.name),
        http_method => op.method.title(),
        path => interpolated_path(&op.path, &op.parameters),
        params_signature => params.join(", "),
        has_body => op.request_body.is_some(),
        content_type => content_type,
        return_type => return_type,
        summary => op.summary.clone(),
        deprecated => op.deprecated,
    }
}

/// Turn a path template into the body of a C# interpolated string.
///
/// Placeholders that name a declared parameter become `{identifier}`; any
/// other brace is doubled so it stays literal.
pub(crate) fn interpolated_path(path: &str, params: &[IrParameter]) -> String {
    let mut out = String::with_capacity(path.len() + 8);
    let mut rest = path;

    while let Some(ch) = rest.chars().next() {
        let close = if ch == '{' { rest.find('}') } else { None };
        if let Some(end) = close {
            let placeholder = &rest[1..end];
            match params.iter().find(|p| p.original_name == placeholder) {
                Some(param) => {
                    out.push('{');
                    out.push_str(&csharp_identifier(&param.name));
                    out.push('}');
                }
                None => {
                    out.push_str("{{");
                    push_literal(&mut out, placeholder);
                    out.push_str("}}");
                }
            }
            rest = &rest[end + 1..];
            continue;
        }
        push_literal(&mut out, &rest[..ch.len_utf8()]);
        rest = &rest[ch.len_utf8()..];
    }

    out
}

fn push_literal(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '{' => out.push_str("{{"),
            '}' => out.push_str("}}"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
}

/// `application/json; charset=utf-8` → `application/json`
fn media_type_essence(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or(content_type).trim()
}
