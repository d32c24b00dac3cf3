use swagger_cs_core::ir::IrType;

/// Map an `IrType` to its C# type string representation.
pub fn ir_type_to_csharp(ir_type: &IrType) -> String {
    match ir_type {
        IrType::Integer => "int".to_string(),
        IrType::String => "string".to_string(),
        IrType::Boolean => "bool".to_string(),
        IrType::List => "List<object>".to_string(),
        IrType::Qualified { namespace, name } => format!("{namespace}.{name}"),
        IrType::Ref(name) => name.clone(),
        IrType::Any => "object".to_string(),
    }
}
