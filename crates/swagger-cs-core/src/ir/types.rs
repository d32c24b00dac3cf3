use crate::diagnostics::Diagnostic;

/// A fully lowered, generator-ready intermediate representation of a document.
#[derive(Debug, Clone)]
pub struct IrSpec {
    pub info: IrInfo,
    pub schemas: Vec<IrSchema>,
    pub operations: Vec<IrOperation>,
    /// Everything that was skipped or degraded while lowering.
    pub diagnostics: Vec<Diagnostic>,
}

/// API metadata plus the names derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrInfo {
    pub title: String,
    pub description: Option<String>,
    /// `{Title}V{Version}HttpClient`
    pub client_class_name: String,
    /// `{TitleWithoutSpaces}HttpClient`
    pub output_dir: String,
}

impl IrSpec {
    pub fn schema(&self, name: &str) -> Option<&IrSchema> {
        self.schemas.iter().find(|s| s.name() == name)
    }

    pub fn operation(&self, name: &str) -> Option<&IrOperation> {
        self.operations.iter().find(|op| op.name == name)
    }
}

// Re-export schema and operation types for convenience
pub use super::operations::*;
pub use super::schemas::*;
