// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Proto3 JSON codec
//!
//! Decodes and encodes [`Message`] types using the proto3 JSON mapping.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use cacheconf::encoding::json::JsonCodec;
//! use cacheconf::schema::EagerCacheRuleSpec;
//!
//! let codec = JsonCodec::compact();
//! let rule: EagerCacheRuleSpec = codec.decode(r#"{"tableName": "T"}"#)?;
//! assert_eq!(codec.encode(&rule)?, r#"{"tableName":"T"}"#);
//! # Ok(())
//! # }
//! ```

use crate::core::{HarnessError, Result};
use crate::schema::Message;

/// Output layout of encoded JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonLayout {
    /// Two-space indented, one field per line
    #[default]
    Pretty,
    /// Single line, no insignificant whitespace
    Compact,
}

/// JSON codec for [`Message`] types.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    layout: JsonLayout,
}

impl JsonCodec {
    /// Create a codec with the given output layout.
    pub fn new(layout: JsonLayout) -> Self {
        Self { layout }
    }

    /// Codec producing indented output.
    pub fn pretty() -> Self {
        Self::new(JsonLayout::Pretty)
    }

    /// Codec producing single-line output.
    pub fn compact() -> Self {
        Self::new(JsonLayout::Compact)
    }

    /// Output layout of this codec.
    pub fn layout(&self) -> JsonLayout {
        self.layout
    }

    /// Decode a JSON string into a message.
    ///
    /// The payload must be a JSON object. Unknown fields are ignored.
    pub fn decode<M: Message>(&self, json: &str) -> Result<M> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| HarnessError::decode(M::TYPE_NAME, format!("{e}")))?;
        self.decode_value(value)
    }

    /// Decode an already-parsed JSON value into a message.
    pub fn decode_value<M: Message>(&self, value: serde_json::Value) -> Result<M> {
        if !value.is_object() {
            return Err(HarnessError::decode(
                M::TYPE_NAME,
                format!("expected a JSON object, found {}", json_kind(&value)),
            ));
        }
        serde_json::from_value(value).map_err(|e| HarnessError::decode(M::TYPE_NAME, format!("{e}")))
    }

    /// Encode a message to a JSON string.
    pub fn encode<M: Message>(&self, message: &M) -> Result<String> {
        let encoded = match self.layout {
            JsonLayout::Pretty => serde_json::to_string_pretty(message),
            JsonLayout::Compact => serde_json::to_string(message),
        };
        encoded.map_err(|e| HarnessError::encode(M::TYPE_NAME, format!("{e}")))
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EagerCacheRuleSpec, KeyFormat, NamespacedObjectReference};

    #[test]
    fn test_decode_object() {
        let codec = JsonCodec::default();
        let reference: NamespacedObjectReference = codec
            .decode(r#"{"name": "myCache", "namespace": "myNamespace"}"#)
            .unwrap();
        assert_eq!(reference.name(), "myCache");
        assert_eq!(reference.namespace(), "myNamespace");
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let codec = JsonCodec::default();
        let rule: EagerCacheRuleSpec = codec
            .decode(r#"{"tableName": "T", "futureField": {"x": 1}}"#)
            .unwrap();
        assert_eq!(rule.table_name(), "T");
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let codec = JsonCodec::default();
        let err = codec.decode::<EagerCacheRuleSpec>("[1, 2]").unwrap_err();
        assert!(matches!(err, HarnessError::DecodeError { .. }));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_decode_malformed() {
        let codec = JsonCodec::default();
        let err = codec.decode::<EagerCacheRuleSpec>("{\"tableName\":").unwrap_err();
        assert!(err.to_string().starts_with("Failed to decode 'EagerCacheRuleSpec'"));
    }

    #[test]
    fn test_decode_wrong_field_type() {
        let codec = JsonCodec::default();
        assert!(codec
            .decode::<EagerCacheRuleSpec>(r#"{"tableName": 5}"#)
            .is_err());
        assert!(codec
            .decode::<EagerCacheRuleSpec>(r#"{"key": {"format": "YAML"}}"#)
            .is_err());
    }

    #[test]
    fn test_decode_enum_by_number() {
        let codec = JsonCodec::default();
        let rule: EagerCacheRuleSpec = codec.decode(r#"{"key": {"format": 1}}"#).unwrap();
        assert_eq!(rule.key().format(), KeyFormat::Json);
    }

    #[test]
    fn test_encode_pretty() {
        let codec = JsonCodec::pretty();
        let reference = NamespacedObjectReference::new("c", "");
        assert_eq!(codec.encode(&reference).unwrap(), "{\n  \"name\": \"c\"\n}");
    }

    #[test]
    fn test_encode_default_message() {
        let codec = JsonCodec::compact();
        assert_eq!(codec.encode(&EagerCacheRuleSpec::default()).unwrap(), "{}");
    }
}
