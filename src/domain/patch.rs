//! Serde helpers for partial-update payloads.

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field from an explicit `null`.
///
/// Used with `#[serde(default, deserialize_with = "double_option")]`: a
/// missing field stays `None`, `null` becomes `Some(None)` and a value
/// becomes `Some(Some(v))`.
///
/// # Errors
///
/// Propagates the inner type's deserialization error.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
