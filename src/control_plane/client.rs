//! Control-plane client.
//!
//! # Responsibilities
//! - Hold the parsed service URL and the transport
//! - Render queries and perform the request
//! - Record per-check metrics

use std::time::{Duration, Instant};

use url::Url;

use crate::config::ControlPlaneConfig;
use crate::control_plane::query::{AuthAction, AuthQuery};
use crate::control_plane::types::{AuthError, AuthResult};
use crate::observability::metrics;
use crate::transport::{redact_url, HttpTransport, Transport};

/// Client for the control plane's token and proxy checks.
///
/// Each check is one request: no retries, no background work. The client
/// holds no per-check state and can be cloned freely.
#[derive(Debug, Clone)]
pub struct ControlPlaneClient<T = HttpTransport> {
    service_url: Url,
    transport: T,
    metrics_enabled: bool,
}

impl ControlPlaneClient<HttpTransport> {
    /// Create a client over HTTP with the given round-trip timeout.
    pub fn new(service_url: &str, timeout: Duration) -> AuthResult<Self> {
        let transport = HttpTransport::new(timeout)?;
        Self::with_transport(service_url, transport)
    }

    /// Create a client from the `[control_plane]` configuration section.
    pub fn from_config(config: &ControlPlaneConfig) -> AuthResult<Self> {
        Self::new(
            &config.service_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }
}

impl<T: Transport> ControlPlaneClient<T> {
    /// Create a client over an arbitrary transport.
    pub fn with_transport(service_url: &str, transport: T) -> AuthResult<Self> {
        let service_url = Url::parse(service_url).map_err(|source| AuthError::InvalidServiceUrl {
            url: service_url.to_string(),
            source,
        })?;

        Ok(Self {
            service_url,
            transport,
            metrics_enabled: true,
        })
    }

    /// Enable or disable metric recording for this client.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    pub fn service_url(&self) -> &Url {
        &self.service_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET the rendered query and return the raw body.
    pub(crate) async fn fetch(&self, query: &AuthQuery) -> AuthResult<String> {
        let url = query.to_url(&self.service_url);
        tracing::debug!(url = %redact_url(&url), "Querying control plane");

        self.transport.get(&url).await.map_err(|e| {
            tracing::warn!(error = %e, "Control plane unreachable");
            AuthError::from(e)
        })
    }

    pub(crate) fn record(&self, action: AuthAction, outcome: &'static str, started: Instant) {
        if self.metrics_enabled {
            metrics::record_check(action.as_str(), outcome, started.elapsed());
        }
    }
}

/// Metric label for a boolean check result.
pub(crate) fn outcome(result: &AuthResult<bool>) -> &'static str {
    match result {
        Ok(true) => "granted",
        Ok(false) => "denied",
        Err(e) => e.kind(),
    }
}
