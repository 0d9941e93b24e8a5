// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Name-keyed registry used for schema lookup.
//!
//! Entries are resolved by string at run time, so fixtures whose concrete
//! type is only discovered while scanning a directory can still be routed
//! to the right codec.

use super::error::{HarnessError, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe registry keyed by type name.
///
/// Uses RwLock for concurrent read access with exclusive write access.
pub struct TypeRegistry<T> {
    inner: RwLock<HashMap<String, T>>,
}

fn poisoned<E: std::fmt::Display>(e: E) -> HarnessError {
    HarnessError::Other(format!("Registry lock poisoned: {e}"))
}

impl<T> TypeRegistry<T> {
    /// Create a new empty type registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Register an entry, returning the entry it replaced, if any.
    pub fn register(&self, name: impl Into<String>, entry: T) -> Result<Option<T>> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        Ok(inner.insert(name.into(), entry))
    }

    /// Get an entry by name.
    pub fn get(&self, name: &str) -> Result<Option<T>>
    where
        T: Clone,
    {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.get(name).cloned())
    }

    /// Check if a name is registered.
    pub fn contains(&self, name: &str) -> Result<bool> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.contains_key(name))
    }

    /// Get all registered names, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        let inner = self.inner.read().map_err(poisoned)?;
        let mut names: Vec<String> = inner.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    /// Remove an entry from the registry.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        Ok(inner.remove(name).is_some())
    }

    /// Get the number of registered entries.
    pub fn len(&self) -> Result<usize> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.len())
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
impl<T> TypeRegistry<T> {
    /// Poison the lock by panicking while holding it.
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.inner.write();
            panic!("poisoning registry lock");
        }));
    }
}

impl<T> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
