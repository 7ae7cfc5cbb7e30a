// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed values produced by conversion.
//!
//! A [`Value`] is immutable and cheap to clone. It remembers the constructor
//! it was built from and keeps its fields in declared parameter order, which
//! is the order a wire codec walks them in.

use crate::config::{INDENT_STEP, NULL_LITERAL, SCALAR_FIELD};
use crate::registry::{ConstructorId, Registry};
use crate::types::Type;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Raw payload of a built-in scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Int(i64),
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Str(v) => f.write_str(v),
        }
    }
}

/// A field of a typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// Synthetic `value` field of `int` / `str`.
    Scalar(Scalar),
    /// Nested typed value.
    Value(Value),
}

#[derive(Debug, PartialEq, Eq)]
struct ValueInner {
    constructor: ConstructorId,
    fields: IndexMap<String, Field>,
}

/// Immutable typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    inner: Arc<ValueInner>,
}

impl Value {
    fn new(constructor: ConstructorId, fields: IndexMap<String, Field>) -> Self {
        Self {
            inner: Arc::new(ValueInner {
                constructor,
                fields,
            }),
        }
    }

    pub(crate) fn int(v: i64) -> Self {
        let mut fields = IndexMap::with_capacity(1);
        fields.insert(SCALAR_FIELD.to_string(), Field::Scalar(Scalar::Int(v)));
        Self::new(ConstructorId::INT, fields)
    }

    pub(crate) fn str(v: String) -> Self {
        let mut fields = IndexMap::with_capacity(1);
        fields.insert(SCALAR_FIELD.to_string(), Field::Scalar(Scalar::Str(v)));
        Self::new(ConstructorId::STR, fields)
    }

    pub(crate) fn null() -> Self {
        Self::new(ConstructorId::NULL, IndexMap::new())
    }

    pub(crate) fn record(constructor: ConstructorId, fields: IndexMap<String, Value>) -> Self {
        let fields = fields
            .into_iter()
            .map(|(name, value)| (name, Field::Value(value)))
            .collect();
        Self::new(constructor, fields)
    }

    /// Constructor this value was built from.
    pub fn constructor(&self) -> ConstructorId {
        self.inner.constructor
    }

    /// Type this value was built from (always simple).
    pub fn ty(&self) -> Type {
        Type::Simple(self.inner.constructor)
    }

    /// Fields in declared parameter order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.inner.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.inner.fields.len()
    }

    /// Check if the value has no fields (`null` or an empty record).
    pub fn is_empty(&self) -> bool {
        self.inner.fields.is_empty()
    }

    /// Field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.inner.fields.get(name)
    }

    /// Nested value by parameter name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.field(name)? {
            Field::Value(v) => Some(v),
            Field::Scalar(_) => None,
        }
    }

    /// Payload of an `int` value.
    pub fn as_int(&self) -> Option<i64> {
        match self.field(SCALAR_FIELD)? {
            Field::Scalar(Scalar::Int(v)) if self.constructor() == ConstructorId::INT => Some(*v),
            _ => None,
        }
    }

    /// Payload of a `str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self.field(SCALAR_FIELD)? {
            Field::Scalar(Scalar::Str(v)) if self.constructor() == ConstructorId::STR => Some(v),
            _ => None,
        }
    }

    /// Check if this is a `null` value.
    pub fn is_null(&self) -> bool {
        self.constructor() == ConstructorId::NULL
    }

    /// Indented debug rendering; needs the registry for type names.
    ///
    /// `null` renders as the bare literal and a record without fields as
    /// `Name()`.
    ///
    /// ```text
    /// User.bot(
    ///     id=int(
    ///         value=1
    ///     )
    ///     first_name=null
    /// )
    /// ```
    pub fn display<'a>(&'a self, registry: &'a Registry) -> ValueDisplay<'a> {
        ValueDisplay {
            value: self,
            registry,
        }
    }
}

/// [`fmt::Display`] adapter returned by [`Value::display`].
pub struct ValueDisplay<'a> {
    value: &'a Value,
    registry: &'a Registry,
}

impl ValueDisplay<'_> {
    fn render(&self, f: &mut fmt::Formatter<'_>, value: &Value, indent: usize) -> fmt::Result {
        if value.is_null() {
            return f.write_str(NULL_LITERAL);
        }
        let name = self.registry.display_name(value.constructor());
        if value.is_empty() {
            return write!(f, "{}()", name);
        }

        writeln!(f, "{}(", name)?;
        let inner = indent + INDENT_STEP;
        for (index, (key, field)) in value.fields().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{:inner$}{}=", "", key, inner = inner)?;
            match field {
                Field::Scalar(scalar) => write!(f, "{}", scalar)?,
                Field::Value(nested) => self.render(f, nested, inner)?,
            }
        }
        write!(f, "\n{:indent$})", "", indent = indent)
    }
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, self.value, 0)
    }
}
