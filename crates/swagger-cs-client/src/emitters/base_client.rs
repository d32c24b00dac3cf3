/// File name of the shared runtime base class.
pub const BASE_CLIENT_FILE: &str = "BaseApiClient.cs";

/// Emit `BaseApiClient.cs`, the transport every generated client derives from.
///
/// The file has no per-document content.
pub fn emit_base_client() -> String {
    include_str!("../../templates/base_client.cs.j2").to_string()
}
