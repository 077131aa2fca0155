//! Reading the raw CSV body from a file or URL.
//!
//! This is a thin I/O wrapper: it produces bytes, not observations. Schema
//! validation happens in `io::ingest`. URL fetches use a blocking reqwest
//! client (rustls TLS); the single upfront load is the only network touch of
//! a run.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::domain::DataSource;
use crate::error::AppError;

/// Per-request timeout for URL sources.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Read the full CSV body from a source.
pub fn read_source(source: &DataSource) -> Result<String, AppError> {
    match source {
        DataSource::Path(path) => std::fs::read_to_string(path).map_err(|e| {
            AppError::new(2, format!("Failed to read CSV '{}': {e}", path.display()))
        }),
        DataSource::Url(url) => fetch_url(url),
    }
}

fn fetch_url(url: &str) -> Result<String, AppError> {
    let client = Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| AppError::new(4, format!("Failed to fetch '{url}': {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::new(
            4,
            format!("Fetching '{url}' returned HTTP {status}."),
        ));
    }

    response
        .text()
        .map_err(|e| AppError::new(4, format!("Failed to read body of '{url}': {e}")))
}
