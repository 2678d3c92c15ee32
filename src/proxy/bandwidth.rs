//! Unit-aware bandwidth quantities.
//!
//! A quantity is written as a number followed by `KB` or `MB` (e.g. `"300KB"`,
//! `"1.5MB"`) and is stored both as the original text and as a byte count.
//! The enforcement layer consumes the byte count; the text is what gets
//! serialized back into proxy configuration files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Bytes per kilobyte.
pub const KB: i64 = 1024;

/// Bytes per megabyte.
pub const MB: i64 = 1024 * KB;

/// Errors produced while parsing a bandwidth quantity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BandwidthError {
    /// The value does not end in a supported unit.
    #[error("unsupported bandwidth unit in '{0}' (expected KB or MB)")]
    UnsupportedUnit(String),

    /// The numeric part is not a finite number.
    #[error("invalid bandwidth value '{0}'")]
    InvalidNumber(String),

    /// Negative rates are meaningless for shaping.
    #[error("bandwidth value '{0}' is negative")]
    Negative(String),

    /// The byte count does not fit in an i64.
    #[error("bandwidth value '{0}' is out of range")]
    OutOfRange(String),
}

/// A bandwidth rate such as `300KB` (per second).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BandwidthQuantity {
    text: String,
    bytes: i64,
}

impl BandwidthQuantity {
    /// Parse a quantity from its textual form.
    ///
    /// Surrounding whitespace is ignored and an empty string is the zero
    /// quantity.
    pub fn parse(input: &str) -> Result<Self, BandwidthError> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(Self::default());
        }

        let (number, base) = if let Some(number) = text.strip_suffix("MB") {
            (number, MB)
        } else if let Some(number) = text.strip_suffix("KB") {
            (number, KB)
        } else {
            return Err(BandwidthError::UnsupportedUnit(text.to_string()));
        };

        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| BandwidthError::InvalidNumber(text.to_string()))?;
        if !value.is_finite() {
            return Err(BandwidthError::InvalidNumber(text.to_string()));
        }
        if value < 0.0 {
            return Err(BandwidthError::Negative(text.to_string()));
        }

        let bytes = value * base as f64;
        if bytes >= i64::MAX as f64 {
            return Err(BandwidthError::OutOfRange(text.to_string()));
        }

        Ok(Self {
            text: text.to_string(),
            bytes: bytes as i64,
        })
    }

    /// Build a quantity of `kilobytes` KB.
    pub fn from_kilobytes(kilobytes: i64) -> Result<Self, BandwidthError> {
        Self::parse(&format!("{kilobytes}KB"))
    }

    /// Rate in bytes per second.
    pub fn bytes(&self) -> i64 {
        self.bytes
    }

    /// The textual form this quantity was parsed from.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for BandwidthQuantity {
    type Err = BandwidthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BandwidthQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for BandwidthQuantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for BandwidthQuantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
