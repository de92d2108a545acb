// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The evaluator's environment (§4.8): a `variables` dictionary for
//! ordinary SYMBOL bindings and a two-way type registry SYMBOL ↔ type
//! tag, so the (external) parser and CSV reader can translate user type
//! names. Cloning an `Environment` is a true snapshot: `HashMap::clone`
//! plus `Value`'s own `Arc`-backed clone give every worker its own
//! env without touching the original's bindings (§4.10's per-worker
//! env-snapshot requirement).

use rayforce_core::{SymbolId, Tag};
use rayforce_value::{Lambda, Value};
use std::collections::HashMap;

/// Two-level binding structure consulted by the evaluator (§4.8).
#[derive(Clone, Default)]
pub struct Environment {
    variables: HashMap<SymbolId, Value>,
    type_by_name: HashMap<SymbolId, Tag>,
    name_by_type: HashMap<Tag, SymbolId>,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: SymbolId) -> Option<&Value> {
        self.variables.get(&name)
    }

    /// Binds `name` to `value`. A lambda bound without a name picks up
    /// `name` for diagnostics (§4.8: "setting a lambda also attaches its
    /// binding name"); a lambda that already carries a name (e.g. one
    /// rebound under a second alias) keeps it.
    pub fn set(&mut self, name: SymbolId, value: Value) {
        let value = match value {
            Value::Lambda(l) if l.name().is_none() => Value::Lambda(attach_name(l, name)),
            other => other,
        };
        self.variables.insert(name, value);
    }

    #[must_use]
    pub fn contains(&self, name: SymbolId) -> bool {
        self.variables.contains_key(&name)
    }

    /// Registers a two-way mapping between a user-facing type name and
    /// its tag, overwriting any prior mapping for either side.
    pub fn register_type(&mut self, name: SymbolId, tag: Tag) {
        self.type_by_name.insert(name, tag);
        self.name_by_type.insert(tag, name);
    }

    #[must_use]
    pub fn type_of_name(&self, name: SymbolId) -> Option<Tag> {
        self.type_by_name.get(&name).copied()
    }

    #[must_use]
    pub fn name_of_type(&self, tag: Tag) -> Option<SymbolId> {
        self.name_by_type.get(&tag).copied()
    }
}

fn attach_name(l: Lambda, name: SymbolId) -> Lambda {
    l.with_name(name)
}

#[cfg(test)]
mod environment_test;
