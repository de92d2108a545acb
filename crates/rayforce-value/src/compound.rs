// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Compound values: `TABLE`, `DICT`, `ENUM`, `MAPLIST`, `LAMBDA`, `ERROR`
//! (§3.1, §4.7).

use crate::vector::ListVec;
use crate::Vector;
use rayforce_core::{ErrorKind, RayError, SymbolId};
use std::sync::Arc;

/// Two parallel lists: `columns[0]` a SYMBOL vector of names,
/// `columns[1]` a `List` of equal-length value vectors (§3.3: `len(columns[1][i])`
/// all equal).
#[derive(Clone)]
pub struct Table(Arc<TableInner>);

struct TableInner {
    names: Vector,
    columns: ListVec,
}

impl Table {
    /// Builds a table, checking the shape invariant from §3.3.
    pub fn new(names: Vector, columns: Vec<crate::Value>) -> Result<Self, RayError> {
        if names.len() != columns.len() {
            return Err(RayError::length_error("table column-name count does not match column count"));
        }
        let expected_len = columns.first().and_then(crate::Value::len);
        if let Some(expected) = expected_len {
            for col in &columns {
                if col.len() != Some(expected) {
                    return Err(RayError::length_error("table columns must all have equal length"));
                }
            }
        }
        Ok(Self(Arc::new(TableInner {
            names,
            columns: ListVec::new(columns),
        })))
    }

    #[must_use]
    pub fn names(&self) -> &Vector {
        &self.0.names
    }

    #[must_use]
    pub fn columns(&self) -> &[crate::Value] {
        self.0.columns.as_slice()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.0.columns.as_slice().first().and_then(crate::Value::len).unwrap_or(0)
    }

    #[must_use]
    pub fn column(&self, name: SymbolId) -> Option<&crate::Value> {
        let names = self.0.names.as_symbols();
        let idx = names.iter().position(|&n| n == name)?;
        self.0.columns.as_slice().get(idx)
    }
}

/// Same shape as `Table`, unordered key-access semantics.
#[derive(Clone)]
pub struct Dict(Arc<TableInner>);

impl Dict {
    pub fn new(keys: Vector, values: Vec<crate::Value>) -> Result<Self, RayError> {
        if keys.len() != values.len() {
            return Err(RayError::length_error("dict key count does not match value count"));
        }
        Ok(Self(Arc::new(TableInner {
            names: keys,
            columns: ListVec::new(values),
        })))
    }

    #[must_use]
    pub fn keys(&self) -> &Vector {
        &self.0.names
    }

    #[must_use]
    pub fn values(&self) -> &[crate::Value] {
        self.0.columns.as_slice()
    }

    #[must_use]
    pub fn get(&self, key: SymbolId) -> Option<&crate::Value> {
        let keys = self.0.names.as_symbols();
        let idx = keys.iter().position(|&k| k == key)?;
        self.0.columns.as_slice().get(idx)
    }
}

/// A symbol column encoded as indices into a shared domain vector
/// (§4.7). `ids` holds `I64` indices; `NULL` entries are `i64::MIN`.
#[derive(Clone)]
pub struct Enum(Arc<EnumInner>);

struct EnumInner {
    domain_key: SymbolId,
    domain: Vector,
    ids: Vector,
}

impl Enum {
    /// `domain` must be a `VecSymbol`; every non-null entry in `ids`
    /// (an `I64` vector) must be in `[0, domain.len())` (§3.3).
    pub fn new(domain_key: SymbolId, domain: Vector, ids: Vector) -> Result<Self, RayError> {
        for &id in ids.as_i64() {
            if id != i64::MIN && (id < 0 || id as usize >= domain.len()) {
                return Err(RayError::new(ErrorKind::Domain, "enum index out of range of its domain"));
            }
        }
        Ok(Self(Arc::new(EnumInner { domain_key, domain, ids })))
    }

    #[must_use]
    pub fn domain_key(&self) -> SymbolId {
        self.0.domain_key
    }

    #[must_use]
    pub fn domain(&self) -> &Vector {
        &self.0.domain
    }

    #[must_use]
    pub fn ids(&self) -> &Vector {
        &self.0.ids
    }

    /// Peels off the indirection, materializing the underlying symbols
    /// (§4.5: "the kernel peels off the indirection before recursing").
    #[must_use]
    pub fn resolve(&self) -> Vector {
        let domain = self.0.domain.as_symbols();
        let resolved: Vec<SymbolId> = self
            .0
            .ids
            .as_i64()
            .iter()
            .map(|&id| if id == i64::MIN { 0 } else { domain[id as usize] })
            .collect();
        Vector::symbol(&resolved).expect("resolving an enum never needs more memory than the enum itself used")
    }
}

/// Byte-buffer + offset-table external storage for heterogeneous data
/// (§3.1, §4.7's `<name>#` auxiliary files).
#[derive(Clone)]
pub struct MapList(Arc<MapListInner>);

struct MapListInner {
    bytes: Vector, // VecU8
    offsets: Vector, // VecI64, len = entries + 1
}

impl MapList {
    #[must_use]
    pub fn new(bytes: Vector, offsets: Vector) -> Self {
        Self(Arc::new(MapListInner { bytes, offsets }))
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.0.offsets.len().saturating_sub(1)
    }

    #[must_use]
    pub fn entry(&self, i: usize) -> &[u8] {
        let offsets = self.0.offsets.as_i64();
        let start = offsets[i] as usize;
        let end = offsets[i + 1] as usize;
        &self.0.bytes.typed_bytes()[start..end]
    }

    /// The raw byte buffer backing every entry, for splaying to `<name>`.
    #[must_use]
    pub fn bytes(&self) -> &Vector {
        &self.0.bytes
    }

    /// The `VecI64` offset table, for splaying to `<name>#`.
    #[must_use]
    pub fn offsets(&self) -> &Vector {
        &self.0.offsets
    }
}

/// A compiled lambda: argument names, local-slot names, body AST, baked
/// constants, and a debug side-table (§4.9's `nfo`).
#[derive(Clone)]
pub struct Lambda(Arc<LambdaInner>);

struct LambdaInner {
    pub name: Option<SymbolId>,
    pub args: Vec<SymbolId>,
    pub locals: Vec<SymbolId>,
    pub body: crate::Value,
    pub constants: Vec<crate::Value>,
    pub nfo: Option<rayforce_core::SourceSpan>,
}

impl Lambda {
    #[must_use]
    pub fn new(args: Vec<SymbolId>, locals: Vec<SymbolId>, body: crate::Value, constants: Vec<crate::Value>) -> Self {
        Self(Arc::new(LambdaInner {
            name: None,
            args,
            locals,
            body,
            constants,
            nfo: None,
        }))
    }

    #[must_use]
    pub fn with_name(self, name: SymbolId) -> Self {
        let mut inner = (*self.0).clone_fields();
        inner.name = Some(name);
        Self(Arc::new(inner))
    }

    /// Attaches the definition-site span used to annotate errors raised
    /// while evaluating this lambda's body, if the error doesn't already
    /// carry a more specific one (§4.9's `nfo` side-table).
    #[must_use]
    pub fn with_nfo(self, nfo: rayforce_core::SourceSpan) -> Self {
        let mut inner = (*self.0).clone_fields();
        inner.nfo = Some(nfo);
        Self(Arc::new(inner))
    }

    #[must_use]
    pub fn name(&self) -> Option<SymbolId> {
        self.0.name
    }

    #[must_use]
    pub fn nfo(&self) -> Option<&rayforce_core::SourceSpan> {
        self.0.nfo.as_ref()
    }

    #[must_use]
    pub fn args(&self) -> &[SymbolId] {
        &self.0.args
    }

    #[must_use]
    pub fn locals(&self) -> &[SymbolId] {
        &self.0.locals
    }

    #[must_use]
    pub fn body(&self) -> &crate::Value {
        &self.0.body
    }

    #[must_use]
    pub fn constants(&self) -> &[crate::Value] {
        &self.0.constants
    }
}

impl LambdaInner {
    fn clone_fields(&self) -> Self {
        Self {
            name: self.name,
            args: self.args.clone(),
            locals: self.locals.clone(),
            body: self.body.clone(),
            constants: self.constants.clone(),
            nfo: self.nfo.clone(),
        }
    }
}

/// An error value: kind, message, and a span resolved from the raising
/// lambda's `nfo` side-table (§7).
#[derive(Clone)]
pub struct ErrorValue(pub Arc<RayError>);

impl ErrorValue {
    #[must_use]
    pub fn new(err: RayError) -> Self {
        Self(Arc::new(err))
    }

    #[must_use]
    pub fn inner(&self) -> &RayError {
        &self.0
    }
}

#[cfg(test)]
mod compound_test;
