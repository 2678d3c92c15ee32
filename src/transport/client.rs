//! reqwest-backed transport with a fixed round-trip timeout.
//!
//! # Responsibilities
//! - Issue one GET or JSON POST per call
//! - Bound connect + request + body read by a single timeout
//! - Hand back the raw body; status codes are left to the caller's decoder

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::transport::types::{redact_url, TransportError, TransportResult};
use crate::transport::Transport;

/// Default round-trip timeout for control-plane requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP transport used against a real control plane.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn request_error(&self, url: &Url, source: reqwest::Error) -> TransportError {
        // reqwest embeds the full URL, credentials included.
        let source = source.without_url();
        if source.is_timeout() {
            TransportError::Timeout {
                url: redact_url(url),
                timeout: self.timeout,
            }
        } else {
            TransportError::Request {
                url: redact_url(url),
                source,
            }
        }
    }

    async fn read_body(
        &self,
        url: &Url,
        response: reqwest::Response,
        started: Instant,
    ) -> TransportResult<String> {
        let status = response.status();
        let body = response.text().await.map_err(|source| {
            let source = source.without_url();
            if source.is_timeout() {
                TransportError::Timeout {
                    url: redact_url(url),
                    timeout: self.timeout,
                }
            } else {
                TransportError::Body {
                    url: redact_url(url),
                    source,
                }
            }
        })?;

        tracing::debug!(
            url = %redact_url(url),
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Control plane responded"
        );
        if !status.is_success() {
            tracing::warn!(
                url = %redact_url(url),
                status = status.as_u16(),
                "Control plane returned non-success status, decoding body anyway"
            );
        }

        Ok(body)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> TransportResult<String> {
        let started = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.request_error(url, e))?;

        self.read_body(url, response, started).await
    }

    async fn post_json(&self, url: &Url, payload: &serde_json::Value) -> TransportResult<String> {
        let body = serde_json::to_vec(payload)?;
        let started = Instant::now();
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.request_error(url, e))?;

        self.read_body(url, response, started).await
    }
}
