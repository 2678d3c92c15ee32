//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the control-plane URL is usable
//! - Require a user to authenticate as
//! - Validate value ranges (timeout > 0, known log level)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AuthConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::AuthConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("control_plane.service_url '{url}' is not a valid URL: {reason}")]
    InvalidServiceUrl { url: String, reason: String },

    #[error("control_plane.service_url '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("control_plane.user must not be empty")]
    EmptyUser,

    #[error("control_plane.request_timeout_secs must be greater than 0")]
    ZeroTimeout,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

/// Check `config` and collect every problem found.
pub fn validate_config(config: &AuthConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let cp = &config.control_plane;

    match Url::parse(&cp.service_url) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            errors.push(ValidationError::UnsupportedScheme(cp.service_url.clone()));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidServiceUrl {
            url: cp.service_url.clone(),
            reason: e.to_string(),
        }),
    }

    if cp.user.trim().is_empty() {
        errors.push(ValidationError::EmptyUser);
    }

    if cp.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
