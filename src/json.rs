//! JSON helpers for control-plane payloads.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Longest body prefix written to logs.
pub(crate) const LOG_EXCERPT_BYTES: usize = 256;

/// Parse `text` as a JSON object.
///
/// `null` is accepted and stands for an object with every field missing.
/// Arrays and scalars are rejected so they cannot be read positionally into
/// a struct.
pub(crate) fn parse_object(text: &str) -> Result<Value, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Null => Ok(Value::Object(serde_json::Map::new())),
        Value::Object(_) => Ok(value),
        other => Err(serde::de::Error::custom(format!(
            "expected a JSON object, found {other}"
        ))),
    }
}

/// Field deserializer that reads an explicit `null` as the type's default.
///
/// Pair with `#[serde(default)]` so missing fields default too.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Prefix of `text` short enough to log, cut on a char boundary.
pub(crate) fn excerpt(text: &str) -> &str {
    if text.len() <= LOG_EXCERPT_BYTES {
        return text;
    }
    let mut end = LOG_EXCERPT_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
