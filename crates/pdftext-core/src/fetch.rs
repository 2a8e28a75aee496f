//! Retrieval of remote documents.

use std::time::Duration;

use tracing::debug;

use crate::ExtractError;

/// True when `input` should be downloaded rather than opened from disk.
///
/// Only the scheme prefix is checked; anything else is treated as a path.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Download `url` and return the response body.
///
/// The timeout covers connecting, sending and reading the whole body. 4xx and
/// 5xx responses are errors.
pub async fn fetch_pdf(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<Vec<u8>, ExtractError> {
    debug!(url, timeout_secs = timeout.as_secs_f64(), "downloading PDF");

    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await?
        .error_for_status()?;

    let body = response.bytes().await?;
    debug!(url, bytes = body.len(), "download complete");
    Ok(body.to_vec())
}
