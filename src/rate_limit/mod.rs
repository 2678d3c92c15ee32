//! Rate-limit directive handling.
//!
//! # Data Flow
//! ```text
//! envelope.message (JSON text)
//!     → directive.rs (string-keyed, then integer-keyed; numerals → KB/s)
//!     → application.rs (mode + optional outbound quantity, built up front)
//!     → apply_to(ProxyTransportConfig)
//! ```
//!
//! # Design Decisions
//! - Structural mismatch is a hard error; a bad numeral is logged and read as 0
//! - Inbound limits are recorded, never enforced
//! - Application is computed completely before anything is written

pub mod application;
pub mod directive;

use thiserror::Error;

use crate::proxy::BandwidthError;

pub use application::RateLimitApplication;
pub use directive::{decode_directive, RateLimitDirective, WireDirective};

/// Errors from decoding a rate-limit message.
#[derive(Debug, Error)]
pub enum RateLimitError {
    /// The message matches neither accepted encoding.
    #[error("rate-limit message matches no known encoding: {0}")]
    Decode(#[source] serde_json::Error),

    /// The outbound rate does not make a valid bandwidth quantity.
    #[error(transparent)]
    Bandwidth(#[from] BandwidthError),
}

/// Decode `message` into a ready-to-apply [`RateLimitApplication`].
pub fn decode_message(message: &str) -> Result<RateLimitApplication, RateLimitError> {
    let directive = decode_directive(message).map_err(RateLimitError::Decode)?;
    Ok(RateLimitApplication::from_directive(directive)?)
}
