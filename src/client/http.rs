//! Shared HTTP client and response helpers.

use std::time::Duration;

use crate::error::FlairError;

/// Build the transport used for resource requests.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, FlairError> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(4)
        .build()?)
}

/// Map a non-success resource response to an error, body preserved.
pub fn status_to_error(status: u16, body: &str) -> FlairError {
    let message = extract_message(body).unwrap_or_else(|| body.to_string());
    FlairError::api(status, message)
}

// JSON:API error documents: {"errors": [{"detail": "..."}]}
fn extract_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
    let first = value.get("errors")?.as_array()?.first()?;
    first
        .get("detail")
        .or_else(|| first.get("title"))
        .and_then(|d| d.as_str())
        .map(str::to_string)
}
