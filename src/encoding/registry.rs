// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec registry keyed by schema type name.
//!
//! Fixtures name their type in the file name, so the harness only learns
//! which codec to use while scanning a directory. This registry maps those
//! names to codecs through an explicit table filled at startup.
//!
//! # Example
//!
//! ```
//! use cacheconf::encoding::CodecRegistry;
//!
//! let registry = CodecRegistry::with_builtin_types();
//! let codec = registry.resolve_codec("EagerCacheRuleSpec")?;
//! let rule = codec.decode_dynamic(r#"{"tableName": "T"}"#)?;
//! assert_eq!(rule.type_name(), "EagerCacheRuleSpec");
//! assert!(registry.resolve_codec("SomethingElse").is_err());
//! # Ok::<(), cacheconf::HarnessError>(())
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{HarnessError, Result, TypeRegistry};
use crate::schema::{
    CacheConf, CacheDataSourceSpec, CacheDeploymentSpec, CacheSpec, EagerCacheKey,
    EagerCacheRuleSpec, LazyCacheRuleSpec, Message, NamespacedObjectReference, ResourceQuantity,
    Resources, Value,
};

use super::codec::{DynCodec, TypedCodec};
use super::json::JsonLayout;

/// Registry of codecs by type name.
#[derive(Default)]
pub struct CodecRegistry {
    codecs: TypeRegistry<Arc<dyn DynCodec>>,
}

impl CodecRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding a pretty-printing codec for every built-in type.
    pub fn with_builtin_types() -> Self {
        Self::with_builtin_types_layout(JsonLayout::Pretty)
    }

    /// Registry holding a codec for every built-in type, with the given
    /// output layout.
    pub fn with_builtin_types_layout(layout: JsonLayout) -> Self {
        let registry = Self::new();
        registry.register_builtin_types(layout);
        registry
    }

    fn register_builtin_types(&self, layout: JsonLayout) {
        self.register_type::<CacheConf>(layout);
        self.register_type::<CacheSpec>(layout);
        self.register_type::<CacheDeploymentSpec>(layout);
        self.register_type::<Resources>(layout);
        self.register_type::<ResourceQuantity>(layout);
        self.register_type::<CacheDataSourceSpec>(layout);
        self.register_type::<EagerCacheRuleSpec>(layout);
        self.register_type::<LazyCacheRuleSpec>(layout);
        self.register_type::<EagerCacheKey>(layout);
        self.register_type::<Value>(layout);
        self.register_type::<NamespacedObjectReference>(layout);
    }

    /// Register the JSON codec of a message type under its schema name.
    pub fn register_type<M: Message>(&self, layout: JsonLayout) -> bool {
        self.register(M::TYPE_NAME, Arc::new(TypedCodec::<M>::new(layout)))
    }

    /// Register a codec under a type name, replacing any previous codec.
    ///
    /// Returns `false` if the codec could not be registered; later lookups
    /// of the name then fail with `SchemaNotFound`.
    pub fn register(&self, type_name: impl Into<String>, codec: Arc<dyn DynCodec>) -> bool {
        let type_name = type_name.into();
        match self.codecs.register(type_name.clone(), codec) {
            Ok(Some(_)) => debug!(type_name = %type_name, "replaced codec"),
            Ok(None) => debug!(type_name = %type_name, "registered codec"),
            Err(e) => {
                warn!(type_name = %type_name, error = %e, "codec registration failed");
                return false;
            }
        }
        true
    }

    /// Unregister a codec.
    ///
    /// Returns `true` if a codec was removed.
    pub fn unregister(&self, type_name: &str) -> bool {
        self.codecs.remove(type_name).unwrap_or(false)
    }

    /// Resolve the codec for a type name.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::SchemaNotFound` if no codec is registered.
    pub fn resolve_codec(&self, type_name: &str) -> Result<Arc<dyn DynCodec>> {
        self.codecs
            .get(type_name)?
            .ok_or_else(|| HarnessError::schema_not_found(type_name))
    }

    /// Check if a type name is registered.
    pub fn has_type(&self, type_name: &str) -> bool {
        self.codecs.contains(type_name).unwrap_or(false)
    }

    /// All registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        self.codecs.names().unwrap_or_default()
    }

    /// Number of registered codecs.
    pub fn count(&self) -> usize {
        self.codecs.len().unwrap_or(0)
    }
}

/// Global codec registry with the built-in types.
///
/// For custom registries, create a `CodecRegistry` instance directly.
static GLOBAL_REGISTRY: std::sync::OnceLock<CodecRegistry> = std::sync::OnceLock::new();

/// Get the global codec registry.
pub fn global_registry() -> &'static CodecRegistry {
    GLOBAL_REGISTRY.get_or_init(CodecRegistry::with_builtin_types)
}
