// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Reference messages and their agreed textual forms.
//!
//! Every implementation of the harness checks its codec against these
//! same literals. Messages are built by factory functions so each scenario
//! gets a fresh value.

use crate::schema::{
    CacheConf, CacheDataSourceSpec, CacheDeploymentSpec, CacheSpec, DbType, DeploymentType,
    EagerCacheKey, EagerCacheRuleSpec, KeyFormat, LazyCacheRuleSpec, NamespacedObjectReference,
    ResourceQuantity, Resources, Value,
};

/// Textual form of [`reference_eager_rule`].
pub const ERULE_1_JSON: &str = r#"{
  "cacheRef": {
    "name": "myCache",
    "namespace": "myNamespace"
  },
  "tableName": "TABLE_EAGER_RULE_1",
  "key": {
    "format": "JSON",
    "keySeparator": ",",
    "keyColumns": ["col1", "col3", "col4"]
  },
  "value": {
    "valueColumns": ["col6", "col7", "col8"]
  }
}"#;

/// A rule differing from [`ERULE_1_JSON`] in table name and key columns.
pub const ERULE_2_JSON: &str = r#"{
  "cacheRef": {
    "name": "myCache",
    "namespace": "myNamespace"
  },
  "tableName": "TABLE_EAGER_RULE_2",
  "key": {
    "format": "JSON",
    "keySeparator": ",",
    "keyColumns": ["colA", "colB", "colC"]
  },
  "value": {
    "valueColumns": ["col6", "col7", "col8"]
  }
}"#;

/// Full cache configuration authored as YAML.
pub const CACHE_CONF_YAML: &str = r#"
cacheSpec:
  deployment:
    resources:
      requests:
        memory: "4Gi"
        cpu: "2"
      limits:
        memory: "8Gi"
        cpu: "4"
  dataSource:
    connectionProperties:
      prop1: value1
      prop2: value2
eagerCacheRuleSpecs:
  myEagerCacheRule:
    cacheRef:
      name: myCache
      namespace: myNamespace
    tableName: TABLE_EAGER_RULE_2
    key:
      format: "JSON"
      keySeparator: ','
      keyColumns:
        - col2
        - col3
        - col4
    value:
      valueColumns:
        - col6
        - col7
        - col8
lazyCacheRuleSpecs:
  myLazyCacheRule1:
    cacheRef:
      name: myCache
      namespace: myNamespace
    query: select name,surname,address,age from myTable where name='?' and value='?'
"#;

fn my_cache_ref() -> NamespacedObjectReference {
    NamespacedObjectReference::new("myCache", "myNamespace")
}

fn value_columns() -> Value {
    Value::builder().value_columns(["col6", "col7", "col8"]).build()
}

/// The rule [`ERULE_1_JSON`] describes, built field by field.
pub fn reference_eager_rule() -> EagerCacheRuleSpec {
    EagerCacheRuleSpec::builder()
        .cache_ref(my_cache_ref())
        .table_name("TABLE_EAGER_RULE_1")
        .key(
            EagerCacheKey::builder()
                .format(KeyFormat::Json)
                .key_separator(",")
                .key_columns(["col1", "col3", "col4"])
                .build(),
        )
        .value(value_columns())
        .build()
}

/// The rule [`ERULE_2_JSON`] describes.
pub fn different_eager_rule() -> EagerCacheRuleSpec {
    reference_eager_rule()
        .to_builder()
        .table_name("TABLE_EAGER_RULE_2")
        .key(
            EagerCacheKey::builder()
                .format(KeyFormat::Json)
                .key_separator(",")
                .key_columns(["colA", "colB", "colC"])
                .build(),
        )
        .build()
}

/// The configuration [`CACHE_CONF_YAML`] describes.
pub fn reference_cache_conf() -> CacheConf {
    let resources = Resources::new(
        ResourceQuantity::new("4Gi", "2"),
        ResourceQuantity::new("8Gi", "4"),
    );
    let cache_spec = CacheSpec::new(
        CacheDeploymentSpec::new(DeploymentType::Local, 0, resources),
        CacheDataSourceSpec::new(
            DbType::Postgres14,
            [("prop1", "value1"), ("prop2", "value2")],
        ),
    );

    let eager = EagerCacheRuleSpec::builder()
        .cache_ref(my_cache_ref())
        .table_name("TABLE_EAGER_RULE_2")
        .key(
            EagerCacheKey::builder()
                .format(KeyFormat::Json)
                .key_separator(",")
                .key_columns(["col2", "col3", "col4"])
                .build(),
        )
        .value(value_columns())
        .build();
    let lazy = LazyCacheRuleSpec::builder()
        .cache_ref(my_cache_ref())
        .query("select name,surname,address,age from myTable where name='?' and value='?'")
        .build();

    CacheConf::builder()
        .cache_spec(cache_spec)
        .eager_rule("myEagerCacheRule", eager)
        .lazy_rule("myLazyCacheRule1", lazy)
        .build()
}
