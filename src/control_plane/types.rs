//! Control-plane error definitions.

use std::fmt;

use thiserror::Error;

use crate::proxy::BandwidthError;
use crate::rate_limit::RateLimitError;
use crate::transport::TransportError;

/// Which payload failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    TokenEnvelope,
    ProxyEnvelope,
    RateLimitMessage,
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecodeStage::TokenEnvelope => "token-check envelope",
            DecodeStage::ProxyEnvelope => "proxy-check envelope",
            DecodeStage::RateLimitMessage => "rate-limit message",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while authorizing against the control plane.
///
/// An explicit denial is not an error: the checks return `Ok(false)`.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Network failure, timeout or unreadable body.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response does not match any accepted schema.
    #[error("failed to decode {stage}: {source}")]
    Decode {
        stage: DecodeStage,
        #[source]
        source: serde_json::Error,
    },

    /// The granted outbound rate is not a valid bandwidth quantity.
    #[error("invalid bandwidth limit from control plane: {0}")]
    Bandwidth(#[from] BandwidthError),

    /// The configured service URL does not parse.
    #[error("invalid control plane URL '{url}': {source}")]
    InvalidServiceUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl AuthError {
    pub(crate) fn decode(stage: DecodeStage, source: serde_json::Error) -> Self {
        AuthError::Decode { stage, source }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::Transport(_) => "transport_error",
            AuthError::Decode { .. } => "decode_error",
            AuthError::Bandwidth(_) => "config_error",
            AuthError::InvalidServiceUrl { .. } => "config_error",
        }
    }
}

impl From<RateLimitError> for AuthError {
    fn from(err: RateLimitError) -> Self {
        match err {
            RateLimitError::Decode(source) => AuthError::decode(DecodeStage::RateLimitMessage, source),
            RateLimitError::Bandwidth(e) => AuthError::Bandwidth(e),
        }
    }
}

/// Result type for control-plane operations.
pub type AuthResult<T> = Result<T, AuthError>;
