use std::path::PathBuf;
use std::time::Duration;

/// Default timeout for fetching a remote document.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Generation settings. Built from command-line flags; there is no config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory under which the `{Title}HttpClient` folder is created.
    pub output_root: PathBuf,
    /// Emit `BaseApiClient.cs` next to the client.
    pub base_client: bool,
    /// Emit the "do not edit" README.
    pub readme: bool,
    pub fetch_timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("."),
            base_client: true,
            readme: true,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}
