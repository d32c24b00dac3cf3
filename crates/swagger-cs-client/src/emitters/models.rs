use minijinja::context;
use swagger_cs_core::GeneratedFile;
use swagger_cs_core::ir::{IrEnumSchema, IrRecordSchema, IrSchema, IrSpec};

use super::environment;
use crate::error::EmitError;
use crate::type_mapper::ir_type_to_csharp;

/// Emit one `{SchemaName}.cs` file per lowered schema, in document order.
pub fn emit_models(ir: &IrSpec) -> Result<Vec<GeneratedFile>, EmitError> {
    let mut env = environment();
    env.add_template("enum.cs.j2", include_str!("../../templates/enum.cs.j2"))?;
    env.add_template("record.cs.j2", include_str!("../../templates/record.cs.j2"))?;

    ir.schemas
        .iter()
        .map(|schema| {
            let content = match schema {
                IrSchema::Enum(e) => render_enum(&env, e)?,
                IrSchema::Record(r) => render_record(&env, r)?,
            };
            Ok(GeneratedFile {
                path: format!("{}.cs", schema.name()),
                content,
            })
        })
        .collect()
}

fn render_enum(env: &minijinja::Environment<'_>, schema: &IrEnumSchema) -> Result<String, EmitError> {
    let tmpl = env.get_template("enum.cs.j2")?;
    Ok(tmpl.render(context! {
        name => schema.name.clone(),
        description => schema.description.clone(),
        members => schema.members.clone(),
    })?)
}

fn render_record(
    env: &minijinja::Environment<'_>,
    schema: &IrRecordSchema,
) -> Result<String, EmitError> {
    let tmpl = env.get_template("record.cs.j2")?;

    let fields: Vec<minijinja::Value> = schema
        .fields
        .iter()
        .map(|field| {
            // Only annotate when the wire name is not the property name.
            let json_name = (field.name != field.original_name).then(|| field.original_name.clone());
            context! {
                name => field.name.clone(),
                cs_type => ir_type_to_csharp(&field.field_type),
                json_name => json_name,
            }
        })
        .collect();

    Ok(tmpl.render(context! {
        name => schema.name.clone(),
        description => schema.description.clone(),
        fields => fields,
    })?)
}
