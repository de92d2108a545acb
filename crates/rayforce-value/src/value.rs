// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The top-level tagged `Value` (§3.1, §9 "Tagged variants over
//! inheritance"). `clone`/`drop` are Rust's own `Clone`/`Drop` glue: every
//! heap-bearing variant holds an `Arc`, so `#[derive(Clone)]` already
//! gives us §8 property 1 (`drop(clone(x)) == noop`) for free.

use crate::compound::{Dict, Enum, ErrorValue, Lambda, MapList, Table};
use crate::vector::ListVec;
use crate::Vector;
use rayforce_core::{Guid, SymbolId, Tag};

/// A RayforceDB value: an atom, a vector, or a compound.
#[derive(Clone)]
pub enum Value {
    // --- atoms ---
    B8(bool),
    U8(u8),
    I16(i16),
    I32(i32),
    I64(i64),
    F64(f64),
    Date(i32),
    Time(i32),
    Timestamp(i64),
    Symbol(SymbolId),
    Guid(Guid),
    C8(u8),

    // --- vectors ---
    Vector(Vector),
    List(ListVec),

    // --- compounds ---
    Table(Table),
    Dict(Dict),
    Enum(Enum),
    MapList(MapList),
    Lambda(Lambda),
    Error(ErrorValue),

    /// Process-wide sentinel; `clone`/`drop` are no-ops on it (§3.3).
    Null,
}

impl Value {
    #[must_use]
    pub fn tag(&self) -> Option<Tag> {
        Some(match self {
            Self::B8(_) => Tag::B8,
            Self::U8(_) => Tag::U8,
            Self::I16(_) => Tag::I16,
            Self::I32(_) => Tag::I32,
            Self::I64(_) => Tag::I64,
            Self::F64(_) => Tag::F64,
            Self::Date(_) => Tag::Date,
            Self::Time(_) => Tag::Time,
            Self::Timestamp(_) => Tag::Timestamp,
            Self::Symbol(_) => Tag::Symbol,
            Self::Guid(_) => Tag::Guid,
            Self::C8(_) => Tag::C8,
            Self::Vector(v) => v.tag(),
            Self::List(_) => Tag::List,
            Self::Table(_) => Tag::TableT,
            Self::Dict(_) => Tag::DictT,
            Self::Enum(_) => Tag::EnumT,
            Self::MapList(_) => Tag::MapListT,
            Self::Lambda(_) => Tag::LambdaT,
            Self::Error(_) => Tag::ErrorT,
            Self::Null => return None,
        })
    }

    #[must_use]
    pub fn is_atom(&self) -> bool {
        self.tag().is_some_and(Tag::is_atom)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::I16(n) => *n == i16::MIN,
            Self::I32(n) | Self::Date(n) | Self::Time(n) => *n == i32::MIN,
            Self::I64(n) | Self::Timestamp(n) => *n == i64::MIN,
            Self::F64(f) => f.is_nan(),
            Self::Symbol(id) => *id == rayforce_core::NULL_SYMBOL,
            _ => false,
        }
    }

    /// Element count for vectors/`List`; `None` for atoms and compounds
    /// (compounds expose their own `row_count`/`entry_count`).
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Vector(v) => Some(v.len()),
            Self::List(l) => Some(l.as_slice().len()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    #[must_use]
    pub fn as_error(&self) -> Option<&rayforce_core::RayError> {
        match self {
            Self::Error(e) => Some(e.inner()),
            _ => None,
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.tag().map_or("null", Tag::name)
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::B8(b) => write!(f, "B8({b})"),
            Self::U8(n) => write!(f, "U8({n})"),
            Self::I16(n) => write!(f, "I16({n})"),
            Self::I32(n) => write!(f, "I32({n})"),
            Self::I64(n) => write!(f, "I64({n})"),
            Self::F64(n) => write!(f, "F64({n})"),
            Self::Date(n) => write!(f, "Date({n})"),
            Self::Time(n) => write!(f, "Time({n})"),
            Self::Timestamp(n) => write!(f, "Timestamp({n})"),
            Self::Symbol(id) => write!(f, "Symbol({id})"),
            Self::Guid(g) => write!(f, "Guid({g:?})"),
            Self::C8(c) => write!(f, "C8({c})"),
            Self::Vector(v) => write!(f, "Vector({}, len={})", v.tag().name(), v.len()),
            Self::List(l) => write!(f, "List(len={})", l.as_slice().len()),
            Self::Table(t) => write!(f, "Table(rows={})", t.row_count()),
            Self::Dict(d) => write!(f, "Dict(len={})", d.keys().len()),
            Self::Enum(e) => write!(f, "Enum(len={})", e.ids().len()),
            Self::MapList(m) => write!(f, "MapList(entries={})", m.entry_count()),
            Self::Lambda(l) => write!(f, "Lambda(args={})", l.args().len()),
            Self::Error(e) => write!(f, "Error({})", e.inner()),
            Self::Null => write!(f, "Null"),
        }
    }
}

#[cfg(test)]
mod value_test;
