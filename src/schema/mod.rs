// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message types exercised by the conformance fixtures.
//!
//! This module mirrors the gingersnap cache configuration messages:
//! - [`rules`] - Eager and lazy cache rules and their parts
//! - [`cache`] - Cache configuration (`CacheConf`) and its specs
//!
//! Every type follows the proto3 JSON mapping: lowerCamel field names,
//! defaults omitted on output, `null` accepted as "default" on input and
//! enum values written by name.

#[macro_use]
mod proto_enum;

pub mod cache;
pub mod fields;
pub mod rules;

use std::any::Any;
use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::{HarnessError, Result};

pub use cache::{
    CacheConf, CacheConfBuilder, CacheDataSourceSpec, CacheDeploymentSpec, CacheSpec, DbType,
    DeploymentType, ResourceQuantity, Resources,
};
pub use rules::{
    EagerCacheKey, EagerCacheKeyBuilder, EagerCacheRuleSpec, EagerCacheRuleSpecBuilder, KeyFormat,
    LazyCacheRuleSpec, LazyCacheRuleSpecBuilder, NamespacedObjectReference, Value, ValueBuilder,
};

/// A schema-typed message.
///
/// Equality is by value of all fields. Because unset fields are stored as
/// their default, an absent field and a field explicitly holding its
/// default compare equal.
pub trait Message:
    Serialize + DeserializeOwned + Clone + PartialEq + Default + Debug + Send + Sync + 'static
{
    /// Schema name of the message, as used in fixture file names.
    const TYPE_NAME: &'static str;

    /// Whether every field holds its default.
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Object-safe view of a [`Message`], used where the concrete type is only
/// known at run time.
pub trait DynMessage: Debug + Send + Sync + 'static {
    /// Schema name of the message.
    fn type_name(&self) -> &'static str;

    /// Get a reference as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Value equality against another message of any type.
    fn dyn_eq(&self, other: &dyn DynMessage) -> bool;

    /// Convert to a JSON value in the proto3 JSON mapping.
    fn to_json_value(&self) -> Result<serde_json::Value>;

    /// Clone into a new box.
    fn clone_box(&self) -> AnyMessage;
}

/// Type-erased, owned message.
pub type AnyMessage = Box<dyn DynMessage>;

impl<M: Message> DynMessage for M {
    fn type_name(&self) -> &'static str {
        M::TYPE_NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynMessage) -> bool {
        other
            .as_any()
            .downcast_ref::<M>()
            .is_some_and(|other| other == self)
    }

    fn to_json_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| HarnessError::encode(M::TYPE_NAME, format!("{e}")))
    }

    fn clone_box(&self) -> AnyMessage {
        Box::new(self.clone())
    }
}

impl Clone for AnyMessage {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Downcast a type-erased message to a concrete type.
pub fn downcast<M: Message>(message: &dyn DynMessage) -> Option<&M> {
    message.as_any().downcast_ref::<M>()
}
