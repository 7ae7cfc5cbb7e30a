// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type algebra: simple constructors and union types.
//!
//! A [`Type`] is a cheap handle. Simple types point at a constructor in a
//! [`Registry`] arena; union types are a flattened, deduplicated set of simple
//! members and are never registered themselves.
//!
//! # Example
//!
//! ```
//! use bscheme::{Param, Registry, Type};
//!
//! let mut registry = Registry::new();
//! let user = registry
//!     .register(
//!         "User",
//!         "user",
//!         vec![
//!             Param::new("id", Type::INT),
//!             Param::new("first_name", Type::STR),
//!         ],
//!     )
//!     .unwrap();
//!
//! assert_eq!(
//!     user.canonical_scheme(&registry),
//!     "user id: int, first_name: str = User"
//! );
//! assert_eq!(Type::INT | Type::NULL, Type::NULL | Type::INT);
//! assert_eq!(Type::INT | Type::INT, Type::INT);
//! ```

mod builder;

pub use builder::ConstructorBuilder;

use crate::config::UNION_SEPARATOR;
use crate::data::Data;
use crate::error::{Result, SchemeError};
use crate::hash::Identifier;
use crate::registry::{ConstructorId, Registry};
use crate::value::Value;
use std::collections::BTreeSet;
use std::ops::BitOr;

/// A constructor or a union of constructors.
///
/// Equality follows the registry's identity rules: two simple types are equal
/// only if they are the same constructor, two unions are equal if their member
/// sets are equal. A union never holds fewer than two members; combining a
/// type with itself collapses back to that type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A single registered constructor.
    Simple(ConstructorId),
    /// A sum of at least two constructors.
    Union(UnionType),
}

/// Member set of a union type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnionType {
    members: BTreeSet<ConstructorId>,
}

impl UnionType {
    /// Members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = ConstructorId> + '_ {
        self.members.iter().copied()
    }

    /// Number of members (always at least two).
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the union has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check membership.
    pub fn contains(&self, id: ConstructorId) -> bool {
        self.members.contains(&id)
    }
}

/// A named constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    /// Parameter name, unique within its constructor.
    pub name: String,
    /// Parameter type.
    pub ty: Type,
}

impl Param {
    /// Create a parameter.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl Type {
    /// Built-in integer scalar.
    pub const INT: Type = Type::Simple(ConstructorId::INT);
    /// Built-in text scalar.
    pub const STR: Type = Type::Simple(ConstructorId::STR);
    /// Built-in unit scalar.
    pub const NULL: Type = Type::Simple(ConstructorId::NULL);

    /// Check if this is a union type.
    pub fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }

    /// Constructor handle of a simple type.
    pub fn as_simple(&self) -> Option<ConstructorId> {
        match self {
            Self::Simple(id) => Some(*id),
            Self::Union(_) => None,
        }
    }

    /// Simple members of this type (a simple type yields itself).
    pub fn members(&self) -> impl Iterator<Item = ConstructorId> + '_ {
        match self {
            Self::Simple(id) => {
                Box::new(std::iter::once(*id)) as Box<dyn Iterator<Item = ConstructorId> + '_>
            }
            Self::Union(u) => Box::new(u.members()),
        }
    }

    /// Sum of two types.
    ///
    /// Union operands are spliced in rather than nested, duplicates are
    /// dropped, and a result with a single member collapses to that member.
    /// The operation is commutative and associative.
    pub fn combine(&self, other: &Type) -> Type {
        let mut members = BTreeSet::new();
        members.extend(self.members());
        members.extend(other.members());
        Self::from_members(members)
    }

    /// Sum of any number of types, `None` for an empty input.
    pub fn union_of<I>(types: I) -> Option<Type>
    where
        I: IntoIterator<Item = Type>,
    {
        let mut members = BTreeSet::new();
        for ty in types {
            members.extend(ty.members());
        }
        if members.is_empty() {
            return None;
        }
        Some(Self::from_members(members))
    }

    fn from_members(members: BTreeSet<ConstructorId>) -> Type {
        if members.len() == 1 {
            if let Some(id) = members.first() {
                return Type::Simple(*id);
            }
        }
        Type::Union(UnionType { members })
    }

    /// Display name.
    ///
    /// For a simple type this is the type name, suffixed with
    /// `.constructor_name` when other constructors share the type name. For a
    /// union, the member names sorted and joined with `" | "`.
    ///
    /// The result depends on the registry state at call time: registering a
    /// sibling constructor later changes it.
    pub fn name(&self, registry: &Registry) -> String {
        match self {
            Self::Simple(id) => registry.display_name(*id),
            Self::Union(u) => {
                let mut names: Vec<String> =
                    u.members().map(|id| registry.display_name(id)).collect();
                names.sort();
                names.join(UNION_SEPARATOR)
            }
        }
    }

    /// Canonical scheme text, the identifier preimage.
    ///
    /// `user id: int, first_name: null | str = User` for a record
    /// constructor, the bare name for built-ins, the union name for unions.
    pub fn canonical_scheme(&self, registry: &Registry) -> String {
        match self {
            Self::Simple(id) => registry.scheme_of(*id),
            Self::Union(_) => self.name(registry),
        }
    }

    /// CRC-32 identifier of the canonical scheme.
    ///
    /// Unions have no identifier; hash each member instead.
    pub fn identifier(&self, registry: &Registry) -> Result<Identifier> {
        match self {
            Self::Simple(id) => registry.identifier_of(*id),
            Self::Union(_) => Err(SchemeError::IdentifierUndefinedForUnion(
                self.name(registry),
            )),
        }
    }

    /// Check whether `data` can be converted to this type.
    pub fn validate(&self, registry: &Registry, data: &Data) -> bool {
        registry.validate(self, data)
    }

    /// Convert `data` into a typed value.
    pub fn convert(&self, registry: &Registry, data: &Data) -> Result<Value> {
        registry.convert(self, data)
    }
}

impl From<ConstructorId> for Type {
    fn from(id: ConstructorId) -> Self {
        Type::Simple(id)
    }
}

impl BitOr for Type {
    type Output = Type;

    fn bitor(self, rhs: Type) -> Type {
        self.combine(&rhs)
    }
}

impl BitOr for &Type {
    type Output = Type;

    fn bitor(self, rhs: &Type) -> Type {
        self.combine(rhs)
    }
}
