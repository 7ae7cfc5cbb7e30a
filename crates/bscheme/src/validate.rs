// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Validation and conversion of untyped input against registered types.
//!
//! `validate` is a pure predicate; `convert` builds a [`Value`] tree and
//! reports the first failure with its parameter path. Conversion never relies
//! on an earlier `validate` call: every check is repeated while building.
//!
//! Built-in scalars are kind-exact. A boolean is not an `int` unless the
//! registry was created with [`SchemeConfig::bool_as_int`].
//!
//! Union conversion tries members ordered by display name (ties broken by
//! declaration order), the same order the union's name lists them in, and
//! keeps the first member that validates.
//!
//! [`SchemeConfig::bool_as_int`]: crate::SchemeConfig::bool_as_int

use crate::config::PATH_ROOT;
use crate::data::Data;
use crate::error::{Result, ValidationError, ValidationReason};
use crate::registry::{Builtin, ConstructorId, Registry};
use crate::types::Type;
use crate::value::Value;
use indexmap::IndexMap;

type Converted = std::result::Result<Value, ValidationError>;

impl Registry {
    /// Check whether `data` conforms to `ty`.
    ///
    /// A [`Data::Typed`] value is accepted as-is when it was built from the
    /// very constructor being checked (or one of a union's members).
    pub fn validate(&self, ty: &Type, data: &Data) -> bool {
        match ty {
            Type::Simple(id) => self.validate_constructor(*id, data),
            Type::Union(u) => u.members().any(|id| self.validate_constructor(id, data)),
        }
    }

    fn validate_constructor(&self, id: ConstructorId, data: &Data) -> bool {
        let Some(entry) = self.constructor(id) else {
            return false;
        };
        if let Data::Typed(value) = data {
            return value.constructor() == id;
        }
        match entry.builtin() {
            Some(Builtin::Int) => match data {
                Data::Int(_) => true,
                Data::Bool(_) => self.config().bool_as_int,
                _ => false,
            },
            Some(Builtin::Str) => matches!(data, Data::Str(_)),
            Some(Builtin::Null) => data.is_null(),
            None => {
                let Data::Map(fields) = data else {
                    return false;
                };
                entry.is_defined()
                    && entry.params().iter().all(|param| {
                        fields
                            .get(&param.name)
                            .is_some_and(|field| self.validate(&param.ty, field))
                    })
            }
        }
    }

    /// Convert `data` into a value of `ty`.
    ///
    /// No partial value is returned: the first missing field, kind mismatch
    /// or exhausted union aborts the conversion.
    pub fn convert(&self, ty: &Type, data: &Data) -> Result<Value> {
        let mut path = PATH_ROOT.to_string();
        Ok(self.convert_at(ty, data, &mut path)?)
    }

    /// Members of `ty` in the order conversion tries them.
    pub fn conversion_order(&self, ty: &Type) -> Vec<ConstructorId> {
        let mut branches: Vec<(String, ConstructorId)> = ty
            .members()
            .map(|id| (self.display_name(id), id))
            .collect();
        branches.sort();
        branches.into_iter().map(|(_, id)| id).collect()
    }

    fn convert_at(&self, ty: &Type, data: &Data, path: &mut String) -> Converted {
        if let Type::Simple(id) = ty {
            return self.convert_constructor(*id, data, path);
        }

        let branches = self.conversion_order(ty);
        if let Some(&id) = branches
            .iter()
            .find(|id| self.validate_constructor(**id, data))
        {
            log::trace!(
                "[convert] {}: picked {} from {}",
                path,
                self.display_name(id),
                ty.name(self)
            );
            return self.convert_constructor(id, data, path);
        }

        Err(ValidationError {
            path: path.clone(),
            expected: ty.name(self),
            reason: ValidationReason::NoMatchingBranch {
                attempted: branches.iter().map(|id| self.display_name(*id)).collect(),
            },
        })
    }

    fn convert_constructor(&self, id: ConstructorId, data: &Data, path: &mut String) -> Converted {
        let Some(entry) = self.constructor(id) else {
            return Err(self.failure(path, id, ValidationReason::UnknownConstructor));
        };
        if let Data::Typed(value) = data {
            if value.constructor() == id {
                return Ok(value.clone());
            }
            let found = self.display_name(value.constructor());
            return Err(self.failure(path, id, ValidationReason::ForeignValue { found }));
        }
        let mismatch = |expected: &'static str| ValidationReason::KindMismatch {
            expected,
            found: data.kind(),
        };

        match entry.builtin() {
            Some(Builtin::Int) => match data {
                Data::Int(v) => Ok(Value::int(*v)),
                Data::Bool(b) if self.config().bool_as_int => Ok(Value::int(i64::from(*b))),
                _ => Err(self.failure(path, id, mismatch("int"))),
            },
            Some(Builtin::Str) => match data {
                Data::Str(v) => Ok(Value::str(v.clone())),
                _ => Err(self.failure(path, id, mismatch("str"))),
            },
            Some(Builtin::Null) => match data {
                Data::Null => Ok(Value::null()),
                _ => Err(self.failure(path, id, mismatch("null"))),
            },
            None => {
                if !entry.is_defined() {
                    return Err(self.failure(path, id, ValidationReason::Undefined));
                }
                let Data::Map(fields) = data else {
                    let reason = ValidationReason::NotARecord { found: data.kind() };
                    return Err(self.failure(path, id, reason));
                };

                let mut converted = IndexMap::with_capacity(entry.params().len());
                for param in entry.params() {
                    let mark = path.len();
                    path.push('.');
                    path.push_str(&param.name);
                    let result = match fields.get(&param.name) {
                        Some(field) => self.convert_at(&param.ty, field, path),
                        None => Err(ValidationError {
                            path: path.clone(),
                            expected: param.ty.name(self),
                            reason: ValidationReason::MissingField(param.name.clone()),
                        }),
                    };
                    path.truncate(mark);
                    converted.insert(param.name.clone(), result?);
                }
                Ok(Value::record(id, converted))
            }
        }
    }

    fn failure(&self, path: &str, id: ConstructorId, reason: ValidationReason) -> ValidationError {
        ValidationError {
            path: path.to_string(),
            expected: self.display_name(id),
            reason,
        }
    }
}
