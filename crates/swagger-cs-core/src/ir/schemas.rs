/// A named model lowered from `components.schemas`.
#[derive(Debug, Clone, PartialEq)]
pub enum IrSchema {
    Enum(IrEnumSchema),
    Record(IrRecordSchema),
}

impl IrSchema {
    pub fn name(&self) -> &str {
        match self {
            IrSchema::Enum(e) => &e.name,
            IrSchema::Record(r) => &r.name,
        }
    }
}

/// An enumeration; members keep source order.
#[derive(Debug, Clone, PartialEq)]
pub struct IrEnumSchema {
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<String>,
}

/// A record with one field per declared property.
#[derive(Debug, Clone, PartialEq)]
pub struct IrRecordSchema {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<IrField>,
}

/// A field on a record schema.
#[derive(Debug, Clone, PartialEq)]
pub struct IrField {
    /// First character upper-cased, rest untouched.
    pub name: String,
    /// The key as written in the document.
    pub original_name: String,
    pub field_type: IrType,
}

/// A resolved type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrType {
    Integer,
    String,
    Boolean,
    /// A list whose items are untyped.
    List,
    /// A dotted type token, reduced to its last two segments.
    Qualified { namespace: String, name: String },
    /// A component schema that has a generated model.
    Ref(String),
    /// The untyped placeholder.
    Any,
}
