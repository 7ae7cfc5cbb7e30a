// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary Scheme type registry
//!
//! Declares the types a binary wire protocol carries and derives a stable
//! 32-bit identifier for each of them:
//! - Constructors with named, typed parameters, grouped by type name
//! - Union types, flattened and order-independent (`int | null`)
//! - CRC-32 identifiers over a canonical textual scheme
//! - Validation and conversion of untyped input into typed values
//!
//! # Quick Start
//!
//! ```
//! use bscheme::{Data, Identifier, Param, Registry, Type};
//!
//! let mut registry = Registry::new();
//! let user = registry
//!     .register(
//!         "User",
//!         "user",
//!         vec![
//!             Param::new("id", Type::INT),
//!             Param::new("first_name", Type::STR | Type::NULL),
//!         ],
//!     )
//!     .unwrap();
//!
//! let scheme = user.canonical_scheme(&registry);
//! assert_eq!(scheme, "user id: int, first_name: null | str = User");
//! assert_eq!(user.identifier(&registry).unwrap(), Identifier::of(&scheme));
//!
//! let data = Data::record([("id", Data::from(42)), ("first_name", Data::Null)]);
//! let value = registry.convert(&user, &data).unwrap();
//! assert_eq!(value.get("id").and_then(|v| v.as_int()), Some(42));
//! ```
//!
//! # Naming
//!
//! | Registered | Display name | Canonical scheme |
//! |------------|--------------|------------------|
//! | built-in `int` | `int` | `int` |
//! | only `User.user` | `User` | `user id: int = User` |
//! | `User.user` and `User.bot` | `User.user` / `User.bot` | unchanged |
//!
//! Identifiers depend on display names of parameter types, see
//! [`IdentifierPolicy`] for how later registrations are handled.

pub mod config;
pub mod data;
pub mod error;
pub mod hash;
pub mod registry;
mod shared;
pub mod types;
mod validate;
pub mod value;

pub use config::{IdentifierPolicy, SchemeConfig};
pub use data::Data;
pub use error::{Result, SchemeError, ValidationError, ValidationReason};
pub use hash::Identifier;
pub use registry::{Builtin, Constructor, ConstructorId, Registry};
pub use shared::SharedRegistry;
pub use types::{ConstructorBuilder, Param, Type, UnionType};
pub use value::{Field, Scalar, Value, ValueDisplay};
