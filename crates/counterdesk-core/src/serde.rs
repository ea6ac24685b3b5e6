//! Serde helpers for the list wire format.
//!
//! The collection endpoints and the screens speak in plain page numbers where
//! `0` means "no such page". Internally those are `Option<u64>`.

use serde::{Deserialize, Deserializer, Serializer};

/// Serializes `None` as `0` and `Some(n)` as `n`.
pub fn serialize_zero_as_none<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(value.unwrap_or(0))
}

/// Deserializes `0` (or `null`, or `""`) as `None`.
///
/// Numeric strings are accepted like [`deserialize_optional_u64`] accepts them.
pub fn deserialize_zero_as_none<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_optional_u64(deserializer)?.filter(|n| *n != 0))
}

/// Deserializes a number that may arrive as a JSON number or a numeric string.
///
/// Empty strings are treated as `None`, the way empty query parameters are.
pub fn deserialize_optional_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) if s.is_empty() => Ok(None),
        Some(NumberOrString::String(s)) => {
            s.parse::<u64>().map(Some).map_err(serde::de::Error::custom)
        }
    }
}
