// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Cache rule messages.
//!
//! An eager rule binds a database table to a cache: its key is built from
//! an ordered list of key columns joined with a separator, and its value
//! from an ordered list of value columns. Column order is significant.
//!
//! ## Example
//!
//! ```
//! use cacheconf::schema::{EagerCacheKey, EagerCacheRuleSpec, KeyFormat, NamespacedObjectReference};
//!
//! let rule = EagerCacheRuleSpec::builder()
//!     .cache_ref(NamespacedObjectReference::new("myCache", "myNamespace"))
//!     .table_name("TABLE_EAGER_RULE_1")
//!     .key(
//!         EagerCacheKey::builder()
//!             .format(KeyFormat::Json)
//!             .key_separator(",")
//!             .key_columns(["col1", "col3", "col4"])
//!             .build(),
//!     )
//!     .build();
//! assert_eq!(rule.key().key_columns(), ["col1", "col3", "col4"]);
//! ```

use serde::{Deserialize, Serialize};

use super::fields::null_as_default;
use super::Message;

proto_enum! {
    /// Format of the cache key built from the key columns.
    pub enum KeyFormat {
        /// Plain text, columns joined with the key separator
        Text = 0 => "TEXT",
        /// JSON document
        Json = 1 => "JSON",
    }
}

/// Reference to a cache by name and namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespacedObjectReference {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    name: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    namespace: String,
}

impl Message for NamespacedObjectReference {
    const TYPE_NAME: &'static str = "NamespacedObjectReference";
}

impl NamespacedObjectReference {
    /// Create a reference from its two parts.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Create a builder.
    pub fn builder() -> NamespacedObjectReferenceBuilder {
        NamespacedObjectReferenceBuilder::default()
    }

    /// Cache name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cache namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

/// Builder for [`NamespacedObjectReference`].
#[derive(Debug, Clone, Default)]
pub struct NamespacedObjectReferenceBuilder {
    inner: NamespacedObjectReference,
}

impl NamespacedObjectReferenceBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = name.into();
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.inner.namespace = namespace.into();
        self
    }

    pub fn build(self) -> NamespacedObjectReference {
        self.inner
    }
}

/// Key definition of an eager rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EagerCacheKey {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "KeyFormat::is_default"
    )]
    format: KeyFormat,
    #[serde(
        default,
        alias = "key_separator",
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    key_separator: String,
    #[serde(
        default,
        alias = "key_columns",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    key_columns: Vec<String>,
}

impl Message for EagerCacheKey {
    const TYPE_NAME: &'static str = "EagerCacheKey";
}

impl EagerCacheKey {
    /// Create a builder.
    pub fn builder() -> EagerCacheKeyBuilder {
        EagerCacheKeyBuilder::default()
    }

    /// Key format.
    pub fn format(&self) -> KeyFormat {
        self.format
    }

    /// Separator placed between key columns.
    pub fn key_separator(&self) -> &str {
        &self.key_separator
    }

    /// Ordered key columns.
    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }
}

/// Builder for [`EagerCacheKey`].
#[derive(Debug, Clone, Default)]
pub struct EagerCacheKeyBuilder {
    inner: EagerCacheKey,
}

impl EagerCacheKeyBuilder {
    pub fn format(mut self, format: KeyFormat) -> Self {
        self.inner.format = format;
        self
    }

    pub fn key_separator(mut self, separator: impl Into<String>) -> Self {
        self.inner.key_separator = separator.into();
        self
    }

    /// Append one key column.
    pub fn key_column(mut self, column: impl Into<String>) -> Self {
        self.inner.key_columns.push(column.into());
        self
    }

    /// Append all given key columns, in order.
    pub fn key_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner
            .key_columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> EagerCacheKey {
        self.inner
    }
}

/// Value definition of a rule: the ordered columns stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Value {
    #[serde(
        default,
        alias = "value_columns",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    value_columns: Vec<String>,
}

impl Message for Value {
    const TYPE_NAME: &'static str = "Value";
}

impl Value {
    /// Create a builder.
    pub fn builder() -> ValueBuilder {
        ValueBuilder::default()
    }

    /// Ordered value columns.
    pub fn value_columns(&self) -> &[String] {
        &self.value_columns
    }
}

/// Builder for [`Value`].
#[derive(Debug, Clone, Default)]
pub struct ValueBuilder {
    inner: Value,
}

impl ValueBuilder {
    /// Append one value column.
    pub fn value_column(mut self, column: impl Into<String>) -> Self {
        self.inner.value_columns.push(column.into());
        self
    }

    /// Append all given value columns, in order.
    pub fn value_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner
            .value_columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Value {
        self.inner
    }
}

/// Rule that loads a whole table into a cache ahead of use.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EagerCacheRuleSpec {
    #[serde(
        default,
        alias = "cache_ref",
        deserialize_with = "null_as_default",
        skip_serializing_if = "crate::schema::Message::is_default"
    )]
    cache_ref: NamespacedObjectReference,
    #[serde(
        default,
        alias = "table_name",
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    table_name: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "crate::schema::Message::is_default"
    )]
    key: EagerCacheKey,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "crate::schema::Message::is_default"
    )]
    value: Value,
}

impl Message for EagerCacheRuleSpec {
    const TYPE_NAME: &'static str = "EagerCacheRuleSpec";
}

impl EagerCacheRuleSpec {
    /// Create a builder.
    pub fn builder() -> EagerCacheRuleSpecBuilder {
        EagerCacheRuleSpecBuilder::default()
    }

    /// Cache this rule populates.
    pub fn cache_ref(&self) -> &NamespacedObjectReference {
        &self.cache_ref
    }

    /// Source table.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Key definition.
    pub fn key(&self) -> &EagerCacheKey {
        &self.key
    }

    /// Value definition.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Start a builder from this rule.
    pub fn to_builder(&self) -> EagerCacheRuleSpecBuilder {
        EagerCacheRuleSpecBuilder {
            inner: self.clone(),
        }
    }
}

/// Builder for [`EagerCacheRuleSpec`].
#[derive(Debug, Clone, Default)]
pub struct EagerCacheRuleSpecBuilder {
    inner: EagerCacheRuleSpec,
}

impl EagerCacheRuleSpecBuilder {
    pub fn cache_ref(mut self, cache_ref: NamespacedObjectReference) -> Self {
        self.inner.cache_ref = cache_ref;
        self
    }

    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.inner.table_name = table_name.into();
        self
    }

    pub fn key(mut self, key: EagerCacheKey) -> Self {
        self.inner.key = key;
        self
    }

    pub fn value(mut self, value: Value) -> Self {
        self.inner.value = value;
        self
    }

    pub fn build(self) -> EagerCacheRuleSpec {
        self.inner
    }
}

/// Rule that populates a cache on demand from a query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LazyCacheRuleSpec {
    #[serde(
        default,
        alias = "cache_ref",
        deserialize_with = "null_as_default",
        skip_serializing_if = "crate::schema::Message::is_default"
    )]
    cache_ref: NamespacedObjectReference,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    query: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "crate::schema::Message::is_default"
    )]
    value: Value,
}

impl Message for LazyCacheRuleSpec {
    const TYPE_NAME: &'static str = "LazyCacheRuleSpec";
}

impl LazyCacheRuleSpec {
    /// Create a builder.
    pub fn builder() -> LazyCacheRuleSpecBuilder {
        LazyCacheRuleSpecBuilder::default()
    }

    pub fn cache_ref(&self) -> &NamespacedObjectReference {
        &self.cache_ref
    }

    /// Parameterized query, `?` marks bound parameters.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Builder for [`LazyCacheRuleSpec`].
#[derive(Debug, Clone, Default)]
pub struct LazyCacheRuleSpecBuilder {
    inner: LazyCacheRuleSpec,
}

impl LazyCacheRuleSpecBuilder {
    pub fn cache_ref(mut self, cache_ref: NamespacedObjectReference) -> Self {
        self.inner.cache_ref = cache_ref;
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.inner.query = query.into();
        self
    }

    pub fn value(mut self, value: Value) -> Self {
        self.inner.value = value;
        self
    }

    pub fn build(self) -> LazyCacheRuleSpec {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format_names() {
        assert_eq!(KeyFormat::Json.as_str_name(), "JSON");
        assert_eq!(KeyFormat::from_str_name("TEXT"), Some(KeyFormat::Text));
        assert_eq!(KeyFormat::from_number(1), Some(KeyFormat::Json));
        assert_eq!(KeyFormat::from_number(7), None);
        assert_eq!(KeyFormat::default(), KeyFormat::Text);
        assert_eq!(KeyFormat::VALUES.len(), 2);
    }

    #[test]
    fn test_key_format_serde() {
        assert_eq!(serde_json::to_string(&KeyFormat::Json).unwrap(), "\"JSON\"");
        let by_name: KeyFormat = serde_json::from_str("\"JSON\"").unwrap();
        let by_number: KeyFormat = serde_json::from_str("1").unwrap();
        assert_eq!(by_name, by_number);
        assert!(serde_json::from_str::<KeyFormat>("7").is_err());
    }

    #[test]
    fn test_unknown_key_format_name_is_default() {
        let unknown: KeyFormat = serde_json::from_str("\"XML\"").unwrap();
        assert_eq!(unknown, KeyFormat::Text);

        let rule: EagerCacheRuleSpec =
            serde_json::from_str(r#"{"tableName":"T","key":{"format":"XML"}}"#).unwrap();
        assert_eq!(rule, EagerCacheRuleSpec::builder().table_name("T").build());
    }

    #[test]
    fn test_defaults_are_omitted() {
        let rule = EagerCacheRuleSpec::builder()
            .table_name("T")
            .key(EagerCacheKey::builder().format(KeyFormat::Text).build())
            .build();
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"tableName":"T"}"#);
    }

    #[test]
    fn test_field_order_follows_schema() {
        let rule = EagerCacheRuleSpec::builder()
            .value(Value::builder().value_column("v").build())
            .table_name("T")
            .cache_ref(NamespacedObjectReference::new("c", "n"))
            .build();
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(
            json,
            r#"{"cacheRef":{"name":"c","namespace":"n"},"tableName":"T","value":{"valueColumns":["v"]}}"#
        );
    }

    #[test]
    fn test_snake_case_aliases() {
        let rule: EagerCacheRuleSpec = serde_json::from_str(
            r#"{"table_name":"T","key":{"key_separator":"|","key_columns":["a"]}}"#,
        )
        .unwrap();
        assert_eq!(rule.table_name(), "T");
        assert_eq!(rule.key().key_separator(), "|");
        assert_eq!(rule.key().key_columns(), ["a"]);
    }

    #[test]
    fn test_null_fields_are_defaults() {
        let rule: EagerCacheRuleSpec = serde_json::from_str(
            r#"{"cacheRef":null,"tableName":null,"key":{"keyColumns":null,"format":null}}"#,
        )
        .unwrap();
        assert_eq!(rule, EagerCacheRuleSpec::default());
    }

    #[test]
    fn test_builder_appends_in_order() {
        let key = EagerCacheKey::builder()
            .key_column("b")
            .key_columns(["a", "c"])
            .build();
        assert_eq!(key.key_columns(), ["b", "a", "c"]);
    }

    #[test]
    fn test_to_builder() {
        let original = EagerCacheRuleSpec::builder().table_name("A").build();
        let changed = original.to_builder().table_name("B").build();
        assert_eq!(original.table_name(), "A");
        assert_eq!(changed.table_name(), "B");
    }

    #[test]
    fn test_lazy_rule() {
        let rule: LazyCacheRuleSpec = serde_json::from_str(
            r#"{"cacheRef":{"name":"myCache","namespace":"myNamespace"},"query":"select 1"}"#,
        )
        .unwrap();
        assert_eq!(rule.cache_ref().name(), "myCache");
        assert_eq!(rule.query(), "select 1");
        assert!(rule.value().value_columns().is_empty());
    }
}
