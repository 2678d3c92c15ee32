//! Metrics collection.
//!
//! # Metrics
//! - `control_plane_checks_total` (counter): checks by action, outcome
//! - `control_plane_check_duration_seconds` (histogram): round-trip latency
//!
//! # Design Decisions
//! - Emitted through the `metrics` facade; the embedding application
//!   installs whatever recorder/exporter it uses
//! - Outcomes: granted, denied, transport_error, decode_error, config_error

use std::time::Duration;

pub const CHECKS_TOTAL: &str = "control_plane_checks_total";
pub const CHECK_DURATION_SECONDS: &str = "control_plane_check_duration_seconds";

/// Record one completed check.
pub fn record_check(action: &'static str, outcome: &'static str, elapsed: Duration) {
    metrics::counter!(CHECKS_TOTAL, "action" => action, "outcome" => outcome).increment(1);
    metrics::histogram!(CHECK_DURATION_SECONDS, "action" => action).record(elapsed.as_secs_f64());
}
