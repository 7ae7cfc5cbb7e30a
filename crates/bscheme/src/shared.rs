// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Thread-safe registry handle.
//!
//! Registration takes the write lock; name rendering, identifiers and
//! conversion share the read lock. Clones point at the same registry.

use crate::config::SchemeConfig;
use crate::data::Data;
use crate::error::Result;
use crate::hash::Identifier;
use crate::registry::Registry;
use crate::types::{Param, Type};
use crate::value::Value;
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// Cloneable, lock-protected [`Registry`].
///
/// ```
/// use bscheme::{Data, Param, SharedRegistry, Type};
///
/// let shared = SharedRegistry::new();
/// let user = shared
///     .register("User", "user", vec![Param::new("id", Type::INT)])
///     .unwrap();
/// let reader = shared.clone();
/// assert_eq!(reader.canonical_scheme(&user), "user id: int = User");
/// assert!(reader.validate(&user, &Data::record([("id", 7)])));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    /// Shared registry with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`Registry::with_config`].
    pub fn with_config(config: SchemeConfig) -> Self {
        Self::from(Registry::with_config(config))
    }

    /// See [`Registry::register`].
    pub fn register(
        &self,
        type_name: impl Into<String>,
        constructor_name: impl Into<String>,
        params: Vec<Param>,
    ) -> Result<Type> {
        self.inner.write().register(type_name, constructor_name, params)
    }

    /// See [`Registry::declare`].
    pub fn declare(
        &self,
        type_name: impl Into<String>,
        constructor_name: impl Into<String>,
    ) -> Result<Type> {
        self.inner.write().declare(type_name, constructor_name)
    }

    /// See [`Registry::define`].
    pub fn define(&self, ty: &Type, params: Vec<Param>) -> Result<()> {
        self.inner.write().define(ty, params)
    }

    /// See [`Registry::reset`]; the same caveats apply to every clone.
    pub fn reset(&self) {
        self.inner.write().reset();
    }

    /// Read access for batches of queries under one lock.
    pub fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.inner.read()
    }

    /// See [`Registry::lookup`].
    pub fn lookup(&self, constructor_name: &str) -> Option<Type> {
        self.inner.read().lookup(constructor_name)
    }

    /// See [`Type::name`].
    pub fn name(&self, ty: &Type) -> String {
        ty.name(&self.inner.read())
    }

    /// See [`Type::canonical_scheme`].
    pub fn canonical_scheme(&self, ty: &Type) -> String {
        ty.canonical_scheme(&self.inner.read())
    }

    /// See [`Type::identifier`].
    pub fn identifier(&self, ty: &Type) -> Result<Identifier> {
        ty.identifier(&self.inner.read())
    }

    /// See [`Registry::validate`].
    pub fn validate(&self, ty: &Type, data: &Data) -> bool {
        self.inner.read().validate(ty, data)
    }

    /// See [`Registry::convert`].
    pub fn convert(&self, ty: &Type, data: &Data) -> Result<Value> {
        self.inner.read().convert(ty, data)
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }
}
