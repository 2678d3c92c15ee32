//! Rate-limit directive decoding.
//!
//! The control plane encodes the same directive two ways: with `inbound` and
//! `outbound` as strings, or as integers. Decoding walks [`WireDirective`]
//! variants in priority order and stops at the first structural match.
//! Numeral conversion happens afterwards and never fails the decode.

use serde::{Deserialize, Serialize};

use crate::json::parse_object;

/// A decoded directive. Rates are in KB/s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RateLimitDirective {
    pub inbound: i64,
    pub outbound: i64,

    /// Opaque classification from the control plane, passed through.
    #[serde(rename = "type")]
    pub kind: i64,
}

/// `{"inbound": "50", "outbound": "", "type": 1}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StringKeyed {
    inbound: Option<String>,
    outbound: Option<String>,
    #[serde(rename = "type")]
    kind: Option<i64>,
}

/// `{"inbound": 0, "outbound": 300, "type": 2}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IntegerKeyed {
    inbound: Option<i64>,
    outbound: Option<i64>,
    #[serde(rename = "type")]
    kind: Option<i64>,
}

/// The wire encoding a message matched.
#[derive(Debug, Clone)]
pub enum WireDirective {
    StringKeyed(StringKeyed),
    IntegerKeyed(IntegerKeyed),
}

impl WireDirective {
    /// Decode `message`, preferring the string-keyed encoding.
    ///
    /// Returns the integer-keyed decode error when neither shape matches.
    pub fn decode(message: &str) -> Result<Self, serde_json::Error> {
        let value = parse_object(message)?;

        match StringKeyed::deserialize(&value) {
            Ok(wire) => return Ok(Self::StringKeyed(wire)),
            Err(e) => {
                tracing::debug!(error = %e, "Message is not string-keyed, trying integer-keyed")
            }
        }

        IntegerKeyed::deserialize(&value).map(Self::IntegerKeyed)
    }

    pub fn encoding(&self) -> &'static str {
        match self {
            WireDirective::StringKeyed(_) => "string",
            WireDirective::IntegerKeyed(_) => "integer",
        }
    }

    /// Convert to KB/s integers.
    pub fn normalize(&self) -> RateLimitDirective {
        match self {
            WireDirective::StringKeyed(wire) => RateLimitDirective {
                inbound: parse_rate("inbound", wire.inbound.as_deref()),
                outbound: parse_rate("outbound", wire.outbound.as_deref()),
                kind: wire.kind.unwrap_or_default(),
            },
            WireDirective::IntegerKeyed(wire) => RateLimitDirective {
                inbound: wire.inbound.unwrap_or_default(),
                outbound: wire.outbound.unwrap_or_default(),
                kind: wire.kind.unwrap_or_default(),
            },
        }
    }
}

/// Parse a string rate; empty or malformed values become 0.
fn parse_rate(field: &'static str, raw: Option<&str>) -> i64 {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return 0,
    };

    match raw.parse::<i64>() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(field, value = raw, error = %e, "Unparsable rate, treating as 0");
            0
        }
    }
}

/// Decode and normalize a rate-limit message in one step.
pub fn decode_directive(message: &str) -> Result<RateLimitDirective, serde_json::Error> {
    let wire = WireDirective::decode(message)?;
    let directive = wire.normalize();
    tracing::debug!(
        encoding = wire.encoding(),
        inbound_kb = directive.inbound,
        outbound_kb = directive.outbound,
        kind = directive.kind,
        "Decoded rate-limit directive"
    );
    Ok(directive)
}
