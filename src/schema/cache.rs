// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Cache configuration messages.
//!
//! A [`CacheConf`] bundles the cache deployment, its data source and the
//! eager/lazy rules keyed by rule name. Map fields serialize as JSON
//! objects; entries are kept sorted by key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::fields::{int32, is_zero, null_as_default};
use super::rules::{EagerCacheRuleSpec, LazyCacheRuleSpec};
use super::Message;

proto_enum! {
    /// How the cache is deployed.
    pub enum DeploymentType {
        Local = 0 => "LOCAL",
        Cluster = 1 => "CLUSTER",
    }
}

proto_enum! {
    /// Database the cache loads from.
    pub enum DbType {
        Postgres14 = 0 => "POSTGRES_14",
        Mysql8 = 1 => "MYSQL_8",
        SqlServer2019 = 2 => "SQL_SERVER_2019",
    }
}

/// Memory and CPU quantities, in Kubernetes notation (`"4Gi"`, `"2"`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceQuantity {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    memory: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    cpu: String,
}

impl Message for ResourceQuantity {
    const TYPE_NAME: &'static str = "ResourceQuantity";
}

impl ResourceQuantity {
    pub fn new(memory: impl Into<String>, cpu: impl Into<String>) -> Self {
        Self {
            memory: memory.into(),
            cpu: cpu.into(),
        }
    }

    pub fn memory(&self) -> &str {
        &self.memory
    }

    pub fn cpu(&self) -> &str {
        &self.cpu
    }
}

/// Requested and maximum resources of a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "crate::schema::Message::is_default"
    )]
    requests: ResourceQuantity,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "crate::schema::Message::is_default"
    )]
    limits: ResourceQuantity,
}

impl Message for Resources {
    const TYPE_NAME: &'static str = "Resources";
}

impl Resources {
    pub fn new(requests: ResourceQuantity, limits: ResourceQuantity) -> Self {
        Self { requests, limits }
    }

    pub fn requests(&self) -> &ResourceQuantity {
        &self.requests
    }

    pub fn limits(&self) -> &ResourceQuantity {
        &self.limits
    }
}

/// Deployment shape of the cache.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheDeploymentSpec {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "DeploymentType::is_default"
    )]
    deployment_type: DeploymentType,
    #[serde(default, deserialize_with = "int32", skip_serializing_if = "is_zero")]
    replicas: i32,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "crate::schema::Message::is_default"
    )]
    resources: Resources,
}

impl Message for CacheDeploymentSpec {
    const TYPE_NAME: &'static str = "CacheDeploymentSpec";
}

impl CacheDeploymentSpec {
    pub fn new(deployment_type: DeploymentType, replicas: i32, resources: Resources) -> Self {
        Self {
            deployment_type,
            replicas,
            resources,
        }
    }

    pub fn deployment_type(&self) -> DeploymentType {
        self.deployment_type
    }

    pub fn replicas(&self) -> i32 {
        self.replicas
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }
}

/// Database connection settings of the cache.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheDataSourceSpec {
    #[serde(
        default,
        alias = "db_type",
        deserialize_with = "null_as_default",
        skip_serializing_if = "DbType::is_default"
    )]
    db_type: DbType,
    #[serde(
        default,
        alias = "connection_properties",
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    connection_properties: BTreeMap<String, String>,
}

impl Message for CacheDataSourceSpec {
    const TYPE_NAME: &'static str = "CacheDataSourceSpec";
}

impl CacheDataSourceSpec {
    pub fn new<I, K, V>(db_type: DbType, connection_properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            db_type,
            connection_properties: connection_properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn db_type(&self) -> DbType {
        self.db_type
    }

    pub fn connection_properties(&self) -> &BTreeMap<String, String> {
        &self.connection_properties
    }
}

/// Deployment and data source of a cache.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheSpec {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "crate::schema::Message::is_default"
    )]
    deployment: CacheDeploymentSpec,
    #[serde(
        default,
        alias = "data_source",
        deserialize_with = "null_as_default",
        skip_serializing_if = "crate::schema::Message::is_default"
    )]
    data_source: CacheDataSourceSpec,
}

impl Message for CacheSpec {
    const TYPE_NAME: &'static str = "CacheSpec";
}

impl CacheSpec {
    pub fn new(deployment: CacheDeploymentSpec, data_source: CacheDataSourceSpec) -> Self {
        Self {
            deployment,
            data_source,
        }
    }

    pub fn deployment(&self) -> &CacheDeploymentSpec {
        &self.deployment
    }

    pub fn data_source(&self) -> &CacheDataSourceSpec {
        &self.data_source
    }
}

/// Full configuration of one cache.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConf {
    #[serde(
        default,
        alias = "cache_spec",
        deserialize_with = "null_as_default",
        skip_serializing_if = "crate::schema::Message::is_default"
    )]
    cache_spec: CacheSpec,
    #[serde(
        default,
        alias = "eager_cache_rule_specs",
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    eager_cache_rule_specs: BTreeMap<String, EagerCacheRuleSpec>,
    #[serde(
        default,
        alias = "lazy_cache_rule_specs",
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    lazy_cache_rule_specs: BTreeMap<String, LazyCacheRuleSpec>,
}

impl Message for CacheConf {
    const TYPE_NAME: &'static str = "CacheConf";
}

impl CacheConf {
    /// Create a builder.
    pub fn builder() -> CacheConfBuilder {
        CacheConfBuilder::default()
    }

    pub fn cache_spec(&self) -> &CacheSpec {
        &self.cache_spec
    }

    /// Eager rules keyed by rule name.
    pub fn eager_cache_rule_specs(&self) -> &BTreeMap<String, EagerCacheRuleSpec> {
        &self.eager_cache_rule_specs
    }

    /// Lazy rules keyed by rule name.
    pub fn lazy_cache_rule_specs(&self) -> &BTreeMap<String, LazyCacheRuleSpec> {
        &self.lazy_cache_rule_specs
    }
}

/// Builder for [`CacheConf`].
#[derive(Debug, Clone, Default)]
pub struct CacheConfBuilder {
    inner: CacheConf,
}

impl CacheConfBuilder {
    pub fn cache_spec(mut self, cache_spec: CacheSpec) -> Self {
        self.inner.cache_spec = cache_spec;
        self
    }

    /// Add or replace the eager rule stored under `name`.
    pub fn eager_rule(mut self, name: impl Into<String>, rule: EagerCacheRuleSpec) -> Self {
        self.inner.eager_cache_rule_specs.insert(name.into(), rule);
        self
    }

    /// Add or replace the lazy rule stored under `name`.
    pub fn lazy_rule(mut self, name: impl Into<String>, rule: LazyCacheRuleSpec) -> Self {
        self.inner.lazy_cache_rule_specs.insert(name.into(), rule);
        self
    }

    pub fn build(self) -> CacheConf {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_names_with_digits() {
        assert_eq!(DbType::SqlServer2019.as_str_name(), "SQL_SERVER_2019");
        assert_eq!(DbType::from_str_name("MYSQL_8"), Some(DbType::Mysql8));
        assert_eq!(DbType::default(), DbType::Postgres14);
    }

    #[test]
    fn test_deployment_type_field_name() {
        let spec = CacheDeploymentSpec::new(DeploymentType::Cluster, 3, Resources::default());
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"type":"CLUSTER","replicas":3}"#);
    }

    #[test]
    fn test_replicas_from_string() {
        let spec: CacheDeploymentSpec = serde_json::from_str(r#"{"replicas":"2"}"#).unwrap();
        assert_eq!(spec.replicas(), 2);
        assert_eq!(spec.deployment_type(), DeploymentType::Local);
    }

    #[test]
    fn test_connection_properties_sorted() {
        let ds = CacheDataSourceSpec::new(DbType::Mysql8, [("prop2", "b"), ("prop1", "a")]);
        let json = serde_json::to_string(&ds).unwrap();
        assert_eq!(
            json,
            r#"{"dbType":"MYSQL_8","connectionProperties":{"prop1":"a","prop2":"b"}}"#
        );
    }

    #[test]
    fn test_cache_conf_maps() {
        let conf = CacheConf::builder()
            .eager_rule("myEagerCacheRule", EagerCacheRuleSpec::builder().table_name("T").build())
            .lazy_rule("myLazyCacheRule1", LazyCacheRuleSpec::builder().query("q").build())
            .build();
        let json = serde_json::to_string(&conf).unwrap();
        assert_eq!(
            json,
            r#"{"eagerCacheRuleSpecs":{"myEagerCacheRule":{"tableName":"T"}},"lazyCacheRuleSpecs":{"myLazyCacheRule1":{"query":"q"}}}"#
        );
        let back: CacheConf = serde_json::from_str(&json).unwrap();
        assert_eq!(back, conf);
    }

    #[test]
    fn test_empty_nested_equals_unset() {
        let explicit: CacheConf =
            serde_json::from_str(r#"{"cacheSpec":{"deployment":{"resources":{}}}}"#).unwrap();
        assert_eq!(explicit, CacheConf::default());
    }
}
