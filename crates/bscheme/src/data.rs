// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Untyped structured input.
//!
//! [`Data`] is what callers hand to validation and conversion: a JSON-like
//! tree that may embed values already converted by the registry
//! ([`Data::Typed`]), so a record can be assembled from previously typed
//! parts.

use crate::value::Value;
use indexmap::IndexMap;

/// Untyped input tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    /// Absence of a value.
    Null,
    Bool(bool),
    Int(i64),
    /// Non-integral or out-of-range number.
    Float(f64),
    Str(String),
    List(Vec<Data>),
    /// Record, keyed by parameter name.
    Map(IndexMap<String, Data>),
    /// A value already converted against some type.
    Typed(Value),
}

impl Data {
    /// Build a record from key/value pairs.
    pub fn record<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Data>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Record field by name.
    pub fn get(&self, key: &str) -> Option<&Data> {
        match self {
            Self::Map(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Check if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short kind label used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Map(_) => "record",
            Self::Typed(_) => "typed value",
        }
    }
}

impl From<bool> for Data {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Data {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Data {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Data {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Data {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Data {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Data {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Value> for Data {
    fn from(v: Value) -> Self {
        Self::Typed(v)
    }
}

impl<T: Into<Data>> From<Option<T>> for Data {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Data>> From<Vec<T>> for Data {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Data {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match v {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Self::Str(s),
            Json::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Json::Object(fields) => {
                Self::Map(fields.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
