//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files, and
//! every field has a default so a minimal file only names what it changes.

use serde::{Deserialize, Serialize};

use crate::transport::DEFAULT_TIMEOUT;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Control-plane endpoint and credentials.
    pub control_plane: ControlPlaneConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Control-plane connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlPlaneConfig {
    /// Base URL of the control-plane API (e.g. `http://127.0.0.1:7899/api`).
    pub service_url: String,

    /// User the tunnel client authenticates as.
    pub user: String,

    /// API token sent as `apitoken`. Never logged.
    pub api_token: String,

    /// Round-trip timeout for each check, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ControlPlaneConfig {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:7899/api".to_string(),
            user: String::new(),
            api_token: String::new(),
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Record check counters and latencies through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
        }
    }
}
