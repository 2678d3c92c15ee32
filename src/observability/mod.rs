//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! control_plane checks produce:
//!     → tracing events inside a per-check span (request_id, action, proxy)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, pretty or JSON)
//!     → any `metrics` recorder the host application installs
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
