// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scheme constants and per-registry configuration.
//!
//! - **Level 1 (Static)**: rendering constants and built-in names
//! - **Level 2 (Dynamic)**: [`SchemeConfig`], fixed when a registry is created
//!
//! `SchemeConfig` implements `Deserialize` with `#[serde(default)]` so a host
//! application can embed it in its own configuration file.

use serde::{Deserialize, Serialize};

/// Name of the built-in integer scalar (type name and constructor name).
pub const INT_NAME: &str = "int";

/// Name of the built-in text scalar.
pub const STR_NAME: &str = "str";

/// Name of the built-in unit scalar.
pub const NULL_NAME: &str = "null";

/// Literal used when rendering a `null` value.
pub const NULL_LITERAL: &str = "null";

/// Synthetic field holding the raw scalar of an `int` or `str` value.
pub const SCALAR_FIELD: &str = "value";

/// Columns added per nesting level in value debug rendering.
pub const INDENT_STEP: usize = 4;

/// Separator between union member names.
pub const UNION_SEPARATOR: &str = " | ";

/// Separator between a type name and its constructor name.
pub const CONSTRUCTOR_SEPARATOR: char = '.';

/// Root of a validation path (`$.bot_creator.id`).
pub const PATH_ROOT: &str = "$";

/// How a constructor identifier reacts to later registrations.
///
/// A constructor's scheme mentions its parameter types by display name, and a
/// display name gains a `.constructor` suffix as soon as a second constructor
/// shares the type name. Identifiers computed from the live registry state
/// therefore change when a sibling constructor is registered later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierPolicy {
    /// Recompute from the current registry state on every request.
    #[default]
    Live,
    /// Use the identifier recorded when the constructor was defined.
    Frozen,
}

/// Registry configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeConfig {
    /// Identifier policy for simple types.
    pub identifiers: IdentifierPolicy,
    /// Accept boolean input for the `int` scalar.
    pub bool_as_int: bool,
}

impl SchemeConfig {
    /// Default configuration: live identifiers, kind-exact `int`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier policy.
    pub fn with_identifiers(mut self, policy: IdentifierPolicy) -> Self {
        self.identifiers = policy;
        self
    }

    /// Accept (or reject) booleans as `int` input.
    pub fn with_bool_as_int(mut self, enabled: bool) -> Self {
        self.bool_as_int = enabled;
        self
    }
}
