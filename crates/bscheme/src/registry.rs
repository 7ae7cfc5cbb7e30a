// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Constructor registry.
//!
//! The registry is the arena that owns every constructor. It enforces the one
//! hard invariant of the scheme: a constructor name is registered at most once
//! for the lifetime of the registry. A second index groups constructors by
//! their type name, which decides whether a display name needs the
//! `.constructor` suffix.
//!
//! There is no global instance. Callers create a [`Registry`] and pass it to
//! every operation that needs names, identifiers or validation; independent
//! registries (one per test, one per protocol layer) never interfere. Use
//! [`SharedRegistry`](crate::SharedRegistry) to share one across threads.
//!
//! # Architecture
//!
//! ```text
//!   entries: Vec<Constructor>          <- ConstructorId indexes here
//!   by_name: constructor_name -> id    (unique)
//!   by_type_name: type_name -> [id]    (declaration order)
//! ```
//!
//! Parameters and unions refer to constructors by [`ConstructorId`], so
//! recursive and mutually recursive constructors are plain index cycles.
//!
//! A `ConstructorId` carries the id of the registry that issued it. Built-ins
//! use registry id 0 and resolve in every registry; any other handle resolves
//! only in its own registry, and only until that registry is reset.

use crate::config::{
    IdentifierPolicy, SchemeConfig, CONSTRUCTOR_SEPARATOR, INT_NAME, NULL_NAME, STR_NAME,
};
use crate::error::{Result, SchemeError};
use crate::hash::Identifier;
use crate::types::{Param, Type};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Registry id shared by the built-ins.
const BUILTIN_REGISTRY: u32 = 0;

static NEXT_REGISTRY: AtomicU32 = AtomicU32::new(BUILTIN_REGISTRY + 1);

fn next_registry_id() -> u32 {
    NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed)
}

/// Stable handle to a constructor in a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstructorId {
    registry: u32,
    index: u32,
}

impl ConstructorId {
    /// Built-in `int`, installed at construction.
    pub const INT: ConstructorId = ConstructorId::builtin(0);
    /// Built-in `str`.
    pub const STR: ConstructorId = ConstructorId::builtin(1);
    /// Built-in `null`.
    pub const NULL: ConstructorId = ConstructorId::builtin(2);

    const fn builtin(index: u32) -> Self {
        Self {
            registry: BUILTIN_REGISTRY,
            index,
        }
    }

    /// Raw arena index.
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Id of the registry that issued this handle (0 for built-ins).
    pub const fn registry(self) -> u32 {
        self.registry
    }

    fn slot(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for ConstructorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:{}", self.registry, self.index)
    }
}

/// The three fixed scalar constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// 64-bit signed integer.
    Int,
    /// UTF-8 text.
    Str,
    /// Absence of a value.
    Null,
}

impl Builtin {
    const ALL: [Builtin; 3] = [Builtin::Int, Builtin::Str, Builtin::Null];

    /// Type and constructor name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => INT_NAME,
            Self::Str => STR_NAME,
            Self::Null => NULL_NAME,
        }
    }

    /// Reserved handle.
    pub const fn id(self) -> ConstructorId {
        match self {
            Self::Int => ConstructorId::INT,
            Self::Str => ConstructorId::STR,
            Self::Null => ConstructorId::NULL,
        }
    }
}

/// A registered constructor.
#[derive(Debug, Clone)]
pub struct Constructor {
    type_name: String,
    constructor_name: String,
    /// `None` while only forward-declared.
    params: Option<Vec<Param>>,
    builtin: Option<Builtin>,
    /// Identifier recorded when the parameter list was fixed.
    registered_identifier: Option<Identifier>,
    /// Last drifted identifier a warning was logged for.
    reported_identifier: Option<Identifier>,
}

impl Constructor {
    /// Logical type name (`User`).
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Unique constructor name (`user`).
    pub fn constructor_name(&self) -> &str {
        &self.constructor_name
    }

    /// `type_name.constructor_name`, regardless of sibling count.
    pub fn qualified_name(&self) -> String {
        format!(
            "{}{}{}",
            self.type_name, CONSTRUCTOR_SEPARATOR, self.constructor_name
        )
    }

    /// Declared parameters (empty while undefined).
    pub fn params(&self) -> &[Param] {
        self.params.as_deref().unwrap_or(&[])
    }

    /// Parameter by name.
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params().iter().find(|p| p.name == name)
    }

    /// Whether the parameter list is known.
    pub fn is_defined(&self) -> bool {
        self.params.is_some()
    }

    /// Which built-in this is, if any.
    pub fn builtin(&self) -> Option<Builtin> {
        self.builtin
    }

    /// Check if this is one of the built-in scalars.
    pub fn is_builtin(&self) -> bool {
        self.builtin.is_some()
    }

    /// Identifier computed when the constructor was defined.
    pub fn registered_identifier(&self) -> Option<Identifier> {
        self.registered_identifier
    }
}

/// Arena and namespace of constructors.
#[derive(Debug)]
pub struct Registry {
    id: u32,
    config: SchemeConfig,
    entries: Vec<Constructor>,
    by_name: HashMap<String, ConstructorId>,
    by_type_name: HashMap<String, Vec<ConstructorId>>,
}

impl Registry {
    /// Create a registry holding only the built-ins.
    pub fn new() -> Self {
        Self::with_config(SchemeConfig::default())
    }

    /// Create a registry with an explicit configuration.
    pub fn with_config(config: SchemeConfig) -> Self {
        let mut registry = Self {
            id: next_registry_id(),
            config,
            entries: Vec::new(),
            by_name: HashMap::new(),
            by_type_name: HashMap::new(),
        };
        registry.install_builtins();
        registry
    }

    /// Active configuration.
    pub fn config(&self) -> &SchemeConfig {
        &self.config
    }

    /// Process-unique id stamped into every handle this registry issues.
    pub fn id(&self) -> u32 {
        self.id
    }

    fn install_builtins(&mut self) {
        for builtin in Builtin::ALL {
            let id = self.insert(
                builtin.name().to_string(),
                builtin.name().to_string(),
                Some(Vec::new()),
                Some(builtin),
            );
            debug_assert_eq!(id, builtin.id());
            self.record_identifier(id);
        }
    }

    /// Register a fully defined constructor.
    ///
    /// Fails without touching the registry if the constructor name is taken,
    /// if two parameters share a name, or if a parameter refers to a
    /// constructor this registry does not own.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        constructor_name: impl Into<String>,
        params: Vec<Param>,
    ) -> Result<Type> {
        let type_name = type_name.into();
        let constructor_name = constructor_name.into();
        self.check_available(&constructor_name)?;
        self.check_params(&constructor_name, &params)?;

        let id = self.insert(type_name, constructor_name, Some(params), None);
        self.record_identifier(id);
        Ok(Type::Simple(id))
    }

    /// Reserve a constructor name before its parameters are known.
    ///
    /// The returned type can be used in parameter lists (including its own,
    /// for recursive constructors) and is completed with [`define`].
    /// Until then it cannot be hashed, validated or converted.
    ///
    /// [`define`]: Registry::define
    pub fn declare(
        &mut self,
        type_name: impl Into<String>,
        constructor_name: impl Into<String>,
    ) -> Result<Type> {
        let type_name = type_name.into();
        let constructor_name = constructor_name.into();
        self.check_available(&constructor_name)?;

        let id = self.insert(type_name, constructor_name, None, None);
        Ok(Type::Simple(id))
    }

    /// Fix the parameter list of a declared constructor.
    pub fn define(&mut self, ty: &Type, params: Vec<Param>) -> Result<()> {
        let id = match ty {
            Type::Simple(id) => *id,
            Type::Union(_) => return Err(SchemeError::NotAConstructor(ty.name(self))),
        };
        let entry = self
            .constructor(id)
            .ok_or(SchemeError::UnknownConstructor(id))?;
        if entry.is_defined() {
            return Err(SchemeError::AlreadyDefined(entry.qualified_name()));
        }
        let constructor_name = entry.constructor_name.clone();
        self.check_params(&constructor_name, &params)?;

        self.entries[id.slot()].params = Some(params);
        self.record_identifier(id);
        log::debug!("[registry] defined {} {}", constructor_name, id);
        Ok(())
    }

    fn check_available(&self, constructor_name: &str) -> Result<()> {
        match self.by_name.get(constructor_name) {
            Some(&existing) => Err(SchemeError::DuplicateConstructor {
                constructor: constructor_name.to_string(),
                owner: self.owner_label(existing),
            }),
            None => Ok(()),
        }
    }

    fn check_params(&self, constructor_name: &str, params: &[Param]) -> Result<()> {
        let mut seen = HashSet::with_capacity(params.len());
        for param in params {
            if !seen.insert(param.name.as_str()) {
                return Err(SchemeError::DuplicateParam {
                    constructor: constructor_name.to_string(),
                    param: param.name.clone(),
                });
            }
            if let Some(unknown) = param.ty.members().find(|id| self.constructor(*id).is_none()) {
                return Err(SchemeError::UnknownConstructor(unknown));
            }
        }
        Ok(())
    }

    /// `type_name.constructor_name#identifier` of an existing entry.
    fn owner_label(&self, id: ConstructorId) -> String {
        let Some(entry) = self.constructor(id) else {
            return id.to_string();
        };
        match self.identifier_of(id) {
            Ok(identifier) => format!("{}#{}", entry.qualified_name(), identifier),
            Err(_) => entry.qualified_name(),
        }
    }

    fn insert(
        &mut self,
        type_name: String,
        constructor_name: String,
        params: Option<Vec<Param>>,
        builtin: Option<Builtin>,
    ) -> ConstructorId {
        #[allow(clippy::expect_used)] // arena exhausts memory long before u32::MAX entries
        let index = u32::try_from(self.entries.len()).expect("constructor count fits within u32");
        let id = self.handle(index, builtin.is_some());

        self.by_name.insert(constructor_name.clone(), id);
        let siblings = self.by_type_name.entry(type_name.clone()).or_default();
        siblings.push(id);
        let sibling_count = siblings.len();

        log::debug!(
            "[registry] registered {}{}{} as {}",
            type_name,
            CONSTRUCTOR_SEPARATOR,
            constructor_name,
            id
        );
        self.entries.push(Constructor {
            type_name,
            constructor_name,
            params,
            builtin,
            registered_identifier: None,
            reported_identifier: None,
        });

        // The first sibling's display name just gained a suffix.
        if sibling_count == 2 {
            self.report_drift();
        }
        id
    }

    fn record_identifier(&mut self, id: ConstructorId) {
        let identifier = Identifier::of(&self.scheme_of(id));
        self.entries[id.slot()].registered_identifier = Some(identifier);
    }

    /// Warn once per drifted identifier; returns the constructors warned about.
    fn report_drift(&mut self) -> Vec<ConstructorId> {
        let mut reported = Vec::new();
        for id in self.stale_identifiers() {
            let scheme = self.scheme_of(id);
            let live = Identifier::of(&scheme);
            let entry = &mut self.entries[id.slot()];
            if entry.reported_identifier == Some(live) {
                continue;
            }
            log::warn!(
                "[registry] identifier of {} changed after registration: now `{}`",
                entry.qualified_name(),
                scheme
            );
            entry.reported_identifier = Some(live);
            reported.push(id);
        }
        reported
    }

    /// Constructors whose live identifier differs from the one recorded at
    /// definition time.
    ///
    /// A constructor becomes stale when a parameter type's display name gains
    /// a `.constructor` suffix because a sibling was registered later.
    pub fn stale_identifiers(&self) -> Vec<ConstructorId> {
        self.iter()
            .filter(|(id, entry)| {
                entry
                    .registered_identifier
                    .is_some_and(|recorded| recorded != Identifier::of(&self.scheme_of(*id)))
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Type registered under a constructor name.
    pub fn lookup(&self, constructor_name: &str) -> Option<Type> {
        self.by_name.get(constructor_name).copied().map(Type::Simple)
    }

    /// Constructors sharing a type name, in declaration order.
    pub fn constructors_of(&self, type_name: &str) -> &[ConstructorId] {
        self.by_type_name
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn handle(&self, index: u32, builtin: bool) -> ConstructorId {
        ConstructorId {
            registry: if builtin { BUILTIN_REGISTRY } else { self.id },
            index,
        }
    }

    fn owns(&self, id: ConstructorId) -> bool {
        match id.registry {
            BUILTIN_REGISTRY => id.slot() < Builtin::ALL.len(),
            registry => registry == self.id,
        }
    }

    /// Constructor behind a handle, `None` for a handle issued by another
    /// registry or before a reset.
    pub fn constructor(&self, id: ConstructorId) -> Option<&Constructor> {
        if !self.owns(id) {
            return None;
        }
        self.entries.get(id.slot())
    }

    /// Number of constructors, built-ins included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry holds no constructors, built-ins included.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All constructors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ConstructorId, &Constructor)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (self.handle(index as u32, entry.is_builtin()), entry))
    }

    /// Drop every user constructor and reinstall the built-ins.
    ///
    /// **Dangerous.** The registry takes a fresh id, so every non-built-in
    /// `Type` and `Value` obtained before the reset stops resolving: lookups
    /// return `None`, registration rejects it with `UnknownConstructor` and
    /// conversion rejects it as foreign. Prefer creating a fresh `Registry`;
    /// this exists for long-lived owners that must start over in place.
    pub fn reset(&mut self) {
        log::warn!(
            "[registry] reset: dropping {} constructors, existing type handles are now invalid",
            self.entries.len()
        );
        self.id = next_registry_id();
        self.entries.clear();
        self.by_name.clear();
        self.by_type_name.clear();
        self.install_builtins();
    }

    /// Display name of a constructor, `Type` or `Type.constructor`.
    pub(crate) fn display_name(&self, id: ConstructorId) -> String {
        match self.constructor(id) {
            Some(entry) if self.constructors_of(&entry.type_name).len() > 1 => {
                entry.qualified_name()
            }
            Some(entry) => entry.type_name.clone(),
            None => id.to_string(),
        }
    }

    /// Canonical scheme of a constructor.
    pub(crate) fn scheme_of(&self, id: ConstructorId) -> String {
        let Some(entry) = self.constructor(id) else {
            return id.to_string();
        };
        if entry.is_builtin() {
            return entry.constructor_name.clone();
        }
        if entry.params().is_empty() {
            return format!("{} = {}", entry.constructor_name, entry.type_name);
        }
        let params = entry
            .params()
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty.name(self)))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} {} = {}",
            entry.constructor_name, params, entry.type_name
        )
    }

    /// Identifier of a constructor under the configured policy.
    pub(crate) fn identifier_of(&self, id: ConstructorId) -> Result<Identifier> {
        let entry = self
            .constructor(id)
            .ok_or(SchemeError::UnknownConstructor(id))?;
        if !entry.is_defined() {
            return Err(SchemeError::Undefined(entry.qualified_name()));
        }
        if self.config.identifiers == IdentifierPolicy::Frozen {
            if let Some(recorded) = entry.registered_identifier {
                return Ok(recorded);
            }
        }
        Ok(Identifier::of(&self.scheme_of(id)))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
