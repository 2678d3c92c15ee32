//! Control-plane authorization subsystem.
//!
//! # Data Flow
//! ```text
//! check_token(user, token)
//!     → query.rs (action=checktoken, escaped params)
//!     → transport GET
//!     → envelope.rs (TokenEnvelope) → bool
//!
//! check_proxy(user, proxy, msg, token)
//!     → query.rs (action=checkproxy + optional domain/port params)
//!     → transport GET
//!     → envelope.rs (ProxyEnvelope)
//!     → rate_limit (message → RateLimitApplication)
//!     → apply to proxy.transport
//! ```
//!
//! # Security Constraints
//! - The API token is never logged; URLs are redacted before logging
//! - Query values are always escaped

pub mod client;
pub mod envelope;
pub mod proxy;
pub mod query;
pub mod token;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ControlPlaneClient;
pub use envelope::{ProxyEnvelope, TokenEnvelope};
pub use proxy::ProxyVerdict;
pub use query::{AuthAction, AuthQuery};
pub use types::{AuthError, AuthResult, DecodeStage};
