// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for registration, identifier derivation and conversion.
//!
//! None of these are transient: they are either contract violations by the
//! caller (duplicate constructor, hashing a union) or data-shape mismatches.
//! They carry enough context (qualified names, parameter path) to be
//! diagnosed without re-running the operation.

use crate::registry::ConstructorId;
use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SchemeError>;

/// Registry and type algebra failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
    /// A constructor name is already registered.
    #[error("constructor `{constructor}` has already been declared for type {owner}")]
    DuplicateConstructor {
        /// Rejected constructor name.
        constructor: String,
        /// Existing owner, rendered as `type_name.constructor_name#identifier`.
        owner: String,
    },
    /// Two parameters of one constructor share a name.
    #[error("constructor `{constructor}` declares parameter `{param}` twice")]
    DuplicateParam {
        /// Constructor being registered.
        constructor: String,
        /// Repeated parameter name.
        param: String,
    },
    /// A type handle was issued by another registry, or before a reset.
    #[error("unknown constructor handle {0}")]
    UnknownConstructor(ConstructorId),
    /// The constructor was declared but its parameters were never defined.
    #[error("constructor `{0}` is declared but not defined")]
    Undefined(String),
    /// A union was passed where a single constructor is required.
    #[error("{0} is a union, not a constructor")]
    NotAConstructor(String),
    /// A declaration was completed under a different type name.
    #[error("constructor `{constructor}` was declared for type {owner}")]
    DeclaredForOtherType {
        /// Constructor being defined.
        constructor: String,
        /// Type name given at declaration.
        owner: String,
    },
    /// `define` was called on a constructor that already has parameters.
    #[error("constructor `{0}` is already defined")]
    AlreadyDefined(String),
    /// Union types have no single canonical identifier.
    #[error("cannot compute an identifier for union type {0}")]
    IdentifierUndefinedForUnion(String),
    /// Input data does not conform to the requested type.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Conversion failure with the path of the offending parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert `{path}` to {expected}: {reason}")]
pub struct ValidationError {
    /// Parameter path from the root, e.g. `$.bot_creator.id`.
    pub path: String,
    /// Display name of the expected type.
    pub expected: String,
    /// What went wrong.
    pub reason: ValidationReason,
}

/// Why a value failed to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    /// A declared parameter is absent from the input record.
    MissingField(String),
    /// A scalar had the wrong kind.
    KindMismatch {
        /// Kind the scalar type accepts.
        expected: &'static str,
        /// Kind found in the input.
        found: &'static str,
    },
    /// A record constructor was given something other than a record.
    NotARecord {
        /// Kind found in the input.
        found: &'static str,
    },
    /// A typed value built from another constructor.
    ForeignValue {
        /// Display name of the value's constructor.
        found: String,
    },
    /// No union branch accepted the input.
    NoMatchingBranch {
        /// Every branch tried, in conversion order.
        attempted: Vec<String>,
    },
    /// The constructor has no parameter list yet.
    Undefined,
    /// The type handle was issued by another registry, or before a reset.
    UnknownConstructor,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(name) => write!(f, "missing required parameter `{}`", name),
            Self::KindMismatch { expected, found } => {
                write!(f, "expected {}, got {}", expected, found)
            }
            Self::NotARecord { found } => write!(f, "expected a record, got {}", found),
            Self::ForeignValue { found } => write!(f, "value was built as {}", found),
            Self::NoMatchingBranch { attempted } => {
                write!(f, "no branch matched (tried {})", attempted.join(", "))
            }
            Self::Undefined => write!(f, "constructor is declared but not defined"),
            Self::UnknownConstructor => write!(f, "type handle belongs to another registry"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_display() {
        let err = SchemeError::DuplicateConstructor {
            constructor: "user".into(),
            owner: "User.user#1a2b".into(),
        };
        assert_eq!(
            err.to_string(),
            "constructor `user` has already been declared for type User.user#1a2b"
        );
    }

    #[test]
    fn test_validation_display() {
        let err = SchemeError::from(ValidationError {
            path: "$.first_name".into(),
            expected: "null | str".into(),
            reason: ValidationReason::NoMatchingBranch {
                attempted: vec!["null".into(), "str".into()],
            },
        });
        assert_eq!(
            err.to_string(),
            "cannot convert `$.first_name` to null | str: no branch matched (tried null, str)"
        );
    }
}
