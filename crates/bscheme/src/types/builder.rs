// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for constructor declarations.

use crate::error::{Result, SchemeError};
use crate::registry::Registry;
use crate::types::{Param, Type};

/// Builder for a constructor declaration.
///
/// ```
/// use bscheme::{ConstructorBuilder, Registry, Type};
///
/// let mut registry = Registry::new();
/// let user = ConstructorBuilder::new("User", "user")
///     .param("id", Type::INT)
///     .optional_param("first_name", Type::STR)
///     .register(&mut registry)
///     .unwrap();
/// assert_eq!(
///     user.canonical_scheme(&registry),
///     "user id: int, first_name: null | str = User"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ConstructorBuilder {
    type_name: String,
    constructor_name: String,
    params: Vec<Param>,
}

impl ConstructorBuilder {
    /// Start a constructor of `type_name` named `constructor_name`.
    pub fn new(type_name: impl Into<String>, constructor_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            constructor_name: constructor_name.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter.
    pub fn param(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.params.push(Param::new(name, ty));
        self
    }

    /// Append a parameter that also accepts `null`.
    pub fn optional_param(self, name: impl Into<String>, ty: Type) -> Self {
        self.param(name, ty | Type::NULL)
    }

    /// Declared parameters so far.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Register the constructor.
    pub fn register(self, registry: &mut Registry) -> Result<Type> {
        registry.register(self.type_name, self.constructor_name, self.params)
    }

    /// Complete a constructor previously reserved with [`Registry::declare`].
    ///
    /// The declaration is found by constructor name and must carry the
    /// builder's type name.
    pub fn define(self, registry: &mut Registry) -> Result<Type> {
        let declared = registry
            .lookup(&self.constructor_name)
            .ok_or_else(|| SchemeError::Undefined(self.qualified_name()))?;
        let owner = declared
            .as_simple()
            .and_then(|id| registry.constructor(id))
            .map(|entry| entry.type_name().to_string())
            .unwrap_or_default();
        if owner != self.type_name {
            return Err(SchemeError::DeclaredForOtherType {
                constructor: self.qualified_name(),
                owner,
            });
        }
        registry.define(&declared, self.params)?;
        Ok(declared)
    }

    fn qualified_name(&self) -> String {
        format!("{}.{}", self.type_name, self.constructor_name)
    }
}
