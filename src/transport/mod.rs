//! Transport subsystem.
//!
//! # Data Flow
//! ```text
//! control_plane (built URL)
//!     → Transport::get / Transport::post_json
//!     → client.rs (reqwest, fixed timeout)
//!     → raw body string back to the caller
//! ```
//!
//! # Design Decisions
//! - One attempt per call: no retries, no backoff
//! - Every request has a deadline covering connect and body read
//! - HTTP status is not interpreted here; decoding happens one level up

pub mod client;
pub mod types;

use async_trait::async_trait;
use url::Url;

pub use client::{HttpTransport, DEFAULT_TIMEOUT};
pub use types::{redact_url, TransportError, TransportResult};

/// A way to perform a single request against the control plane.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and return the response body.
    async fn get(&self, url: &Url) -> TransportResult<String>;

    /// POST `payload` as JSON to `url` and return the response body.
    async fn post_json(&self, url: &Url, payload: &serde_json::Value) -> TransportResult<String>;
}
