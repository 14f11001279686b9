//! HTTP fetch utilities for the tern viewer.
//!
//! Provides the single blocking GET wrapper used by the page loader.
//! Only `text/html` responses are accepted; the renderer has no use for
//! anything else.

use std::time::Duration;

use thiserror::Error;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Error fetching a page over HTTP(S).
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be created.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request itself failed (DNS, connection, timeout).
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),

    /// The response is not an HTML page.
    #[error("unsupported content type: {0:?}")]
    UnsupportedContentType(String),

    /// The response body could not be decoded as text.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Fetch a URL and return its body as HTML text.
///
/// # Errors
///
/// Returns a [`FetchError`] if the client cannot be created, the request
/// fails, the response has a non-success status, the `Content-Type` does
/// not contain `text/html`, or the body cannot be decoded.
pub fn fetch_html(url: &str) -> Result<String, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .map_err(FetchError::Request)?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if !content_type.contains("text/html") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    response.text().map_err(FetchError::Body)
}
