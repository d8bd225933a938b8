//! Field adapters for backend payloads whose fields may be `null` or of
//! the wrong shape. Such fields fall back to their `Default` instead of
//! failing the whole document.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Other(IgnoredAny),
}

/// Use with `#[serde(deserialize_with = "...")]` next to `#[serde(default)]`
/// so absent, `null` and malformed values all become `T::default()`.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Value(value) => value,
        Lenient::Other(_) => T::default(),
    })
}
