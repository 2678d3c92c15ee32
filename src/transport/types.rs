//! Transport error definitions and URL redaction.

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Query parameters whose values never appear in logs or error messages.
const SENSITIVE_PARAMS: &[&str] = &["apitoken", "token"];

/// Errors that can occur while talking to the control plane over HTTP.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The round trip did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// Connection or request failure.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be read.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request payload could not be serialized.
    #[error("failed to encode request payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Render `url` with the values of credential parameters masked.
pub fn redact_url(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if SENSITIVE_PARAMS.contains(&key.as_ref()) {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_masks_token() {
        let url = Url::parse("http://cp.local/api?action=checktoken&user=bob&apitoken=s3cret").unwrap();
        let redacted = redact_url(&url);
        assert!(!redacted.contains("s3cret"));
        assert!(redacted.contains("apitoken=***") || redacted.contains("apitoken=%2A%2A%2A"));
        assert!(redacted.contains("user=bob"));
    }

    #[test]
    fn test_redact_without_query() {
        let url = Url::parse("http://cp.local/api").unwrap();
        assert_eq!(redact_url(&url), "http://cp.local/api");
    }

    #[test]
    fn test_timeout_display() {
        let err = TransportError::Timeout {
            url: "http://cp.local/api".into(),
            timeout: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "request to http://cp.local/api timed out after 10s");
    }
}
