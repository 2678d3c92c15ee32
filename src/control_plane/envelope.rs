//! Response envelopes returned by the control plane.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::json::{null_as_default, parse_object};

/// `{"status": 200, "success": true}`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub status: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
}

/// `{"status": 200, "success": true, "message": "{\"inbound\":\"\",...}"}`
///
/// `message` is itself JSON, decoded by [`crate::rate_limit`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub status: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

/// Decode an envelope; missing and `null` fields take their defaults.
pub fn decode_envelope<E: DeserializeOwned>(body: &str) -> Result<E, serde_json::Error> {
    serde_json::from_value(parse_object(body)?)
}
