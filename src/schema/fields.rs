// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Field-level serde helpers for the proto3 JSON mapping.

use serde::{Deserialize, Deserializer};

/// Deserialize a field, mapping JSON `null` to the type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize an `int32` field from a JSON number or a numeric string.
pub fn int32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(i64),
        Text(String),
    }

    match Option::<Repr>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Repr::Number(n)) => i32::try_from(n).map_err(serde::de::Error::custom),
        Some(Repr::Text(s)) => s
            .trim()
            .parse::<i32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid int32 '{s}': {e}"))),
    }
}

/// Skip predicate for numeric defaults.
pub fn is_zero(value: &i32) -> bool {
    *value == 0
}
