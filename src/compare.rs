// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Canonical comparison of messages and their encodings.
//!
//! Two levels are offered:
//! - **Typed**: [`equals`] and [`equals_text`] compare decoded messages.
//!   Unset fields are stored as defaults, so presence of a default-valued
//!   field never matters; repeated fields compare in order.
//! - **Structural**: [`canonicalize`] and [`diff_json`] compare JSON trees
//!   without a schema and report every difference with its path. They
//!   treat default-looking members (`null`, `""`, `0`, `false`, `[]`, `{}`)
//!   as absent.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Number, Value as Json};

use crate::core::{HarnessError, Result};
use crate::encoding::CodecRegistry;
use crate::schema::DynMessage;

// ─── Typed comparison ────────────────────────────────────────────────────────

/// Semantic equality of two messages: same schema type and equal fields.
pub fn equals(a: &dyn DynMessage, b: &dyn DynMessage) -> bool {
    a.type_name() == b.type_name() && a.dyn_eq(b)
}

/// Decode both payloads as `type_name` and compare them with [`equals`].
///
/// # Errors
///
/// `SchemaNotFound` if the type is not registered, `DecodeError` if either
/// payload does not decode.
pub fn equals_text(registry: &CodecRegistry, a: &str, b: &str, type_name: &str) -> Result<bool> {
    let codec = registry.resolve_codec(type_name)?;
    let left = codec.decode_dynamic(a)?;
    let right = codec.decode_dynamic(b)?;
    Ok(equals(left.as_ref(), right.as_ref()))
}

// ─── Structural comparison ───────────────────────────────────────────────────

/// Category of a structural difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Member present in expected only
    Missing,
    /// Member present in actual only
    Unexpected,
    /// Arrays of different length
    Length,
    /// Same position, different value
    Value,
}

/// One difference between two JSON trees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonDiff {
    /// Dotted path, e.g. `key.keyColumns[0]`; empty for the root.
    pub path: String,
    pub kind: DiffKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<Json>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Json>,
}

impl fmt::Display for JsonDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "<root>" } else { &self.path };
        let show = |v: &Option<Json>| v.as_ref().map_or("<absent>".to_string(), Json::to_string);
        match self.kind {
            DiffKind::Missing => write!(f, "{path}: missing, expected {}", show(&self.expected)),
            DiffKind::Unexpected => write!(f, "{path}: unexpected {}", show(&self.actual)),
            DiffKind::Length | DiffKind::Value => write!(
                f,
                "{path}: expected {}, got {}",
                show(&self.expected),
                show(&self.actual)
            ),
        }
    }
}

/// Canonicalize a JSON value: drop default-looking object members
/// recursively. Arrays keep their order and elements.
pub fn canonicalize(value: &Json) -> Json {
    match value {
        Json::Object(map) => {
            let mut out = Map::new();
            for (key, val) in map {
                let canonical = canonicalize(val);
                if !is_default_like(&canonical) {
                    out.insert(key.clone(), canonical);
                }
            }
            Json::Object(out)
        }
        Json::Array(items) => Json::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

fn is_default_like(value: &Json) -> bool {
    match value {
        Json::Null => true,
        Json::Bool(b) => !b,
        Json::Number(n) => n.as_f64() == Some(0.0),
        Json::String(s) => s.is_empty(),
        Json::Array(items) => items.is_empty(),
        Json::Object(map) => map.is_empty(),
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Structural differences between two JSON values, after canonicalization.
///
/// An empty result means the trees are equivalent.
pub fn diff_json(expected: &Json, actual: &Json) -> Vec<JsonDiff> {
    let mut diffs = Vec::new();
    deep_compare(&canonicalize(expected), &canonicalize(actual), "", &mut diffs);
    diffs
}

/// Parse two JSON texts and return their structural differences.
///
/// # Errors
///
/// `DecodeError` if either text is not valid JSON.
pub fn diff_json_text(expected: &str, actual: &str) -> Result<Vec<JsonDiff>> {
    let parse = |text: &str| {
        serde_json::from_str::<Json>(text).map_err(|e| HarnessError::decode("json", format!("{e}")))
    };
    Ok(diff_json(&parse(expected)?, &parse(actual)?))
}

fn deep_compare(expected: &Json, actual: &Json, path: &str, diffs: &mut Vec<JsonDiff>) {
    match (expected, actual) {
        (Json::Object(a_map), Json::Object(b_map)) => {
            for (key, a_val) in a_map {
                match b_map.get(key) {
                    Some(b_val) => deep_compare(a_val, b_val, &child(path, key), diffs),
                    None => diffs.push(JsonDiff {
                        path: child(path, key),
                        kind: DiffKind::Missing,
                        expected: Some(a_val.clone()),
                        actual: None,
                    }),
                }
            }
            for (key, b_val) in b_map {
                if !a_map.contains_key(key) {
                    diffs.push(JsonDiff {
                        path: child(path, key),
                        kind: DiffKind::Unexpected,
                        expected: None,
                        actual: Some(b_val.clone()),
                    });
                }
            }
        }
        (Json::Array(a_arr), Json::Array(b_arr)) => {
            if a_arr.len() != b_arr.len() {
                diffs.push(JsonDiff {
                    path: path.to_string(),
                    kind: DiffKind::Length,
                    expected: Some(expected.clone()),
                    actual: Some(actual.clone()),
                });
                return;
            }
            for (i, (a_val, b_val)) in a_arr.iter().zip(b_arr).enumerate() {
                deep_compare(a_val, b_val, &format!("{path}[{i}]"), diffs);
            }
        }
        (Json::Number(a), Json::Number(b)) if numbers_equal(a, b) => {}
        (a, b) if a == b => {}
        _ => diffs.push(JsonDiff {
            path: path.to_string(),
            kind: DiffKind::Value,
            expected: Some(expected.clone()),
            actual: Some(actual.clone()),
        }),
    }
}
