use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};

const USER_AGENT: &str = concat!("swagger-cs/", env!("CARGO_PKG_VERSION"));

/// Whether the source names an `http(s)://` URL rather than a local path.
pub fn is_remote(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Whether the source should be parsed as YAML, judged by its extension.
///
/// Query strings and fragments of URLs are ignored.
pub fn is_yaml(source: &str) -> bool {
    let path = source.split(['?', '#']).next().unwrap_or(source);
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".yaml") || lower.ends_with(".yml")
}

/// Read the document text from a URL or a local file.
pub fn load_source(source: &str, timeout: Duration) -> Result<String> {
    if is_remote(source) {
        fetch(source, timeout)
    } else {
        debug!("reading {source}");
        fs::read_to_string(source).with_context(|| format!("failed to read {source}"))
    }
}

fn fetch(url: &str, timeout: Duration) -> Result<String> {
    info!("fetching {url}");
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build HTTP client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("failed to fetch {url}"))?;

    response
        .text()
        .with_context(|| format!("failed to read response body from {url}"))
}
