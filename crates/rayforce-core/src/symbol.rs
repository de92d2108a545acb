// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Process-global symbol interner (§4.2).
//!
//! The source engine packs `(offset << 8) | length_class` into the id and
//! backs it with a hand-rolled linear `symbol_pool` region reserved via
//! `mmap_commit`. That layout exists to make `str_from_symbol` pointer
//! arithmetic with no extra indirection in C. Rust's allocator already
//! gives us that via `Arc<str>` without unsafe pointer games, so the
//! table here keeps the *contract* (stable process-lifetime ids, O(1)
//! length, idempotent thread-safe insertion) and drops the bit-packing:
//! ids are append-only `Vec` indices (+1, so 0 stays reserved null)
//! behind a `dashmap` lookup table, matching the source's "lookup, then
//! insert if missing" under a single coarse section.

use crate::prime::next_prime;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};

/// Initial bucket-count hint for a fresh interner. `ops_next_prime`'s bucket
/// strategy from `core/ops.h` applies here as the capacity this table
/// reserves up front, rather than `DashMap`'s own default power-of-two
/// growth.
const INITIAL_CAPACITY_HINT: u64 = 64;

/// A symbol id. Id 0 is reserved null (§3.3).
pub type SymbolId = u64;

/// The reserved null symbol id.
pub const NULL_SYMBOL: SymbolId = 0;

/// Process-global interner mapping byte strings to stable 64-bit ids.
pub struct SymbolTable {
    by_bytes: DashMap<Arc<str>, SymbolId>,
    strings: RwLock<Vec<Arc<str>>>,
}

impl SymbolTable {
    fn new() -> Self {
        let capacity = next_prime(INITIAL_CAPACITY_HINT) as usize;
        Self {
            by_bytes: DashMap::with_capacity(capacity),
            strings: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    /// Interns `s`, returning the same id for equal strings across every
    /// thread for the lifetime of the process. A zero-length string is a
    /// valid, distinct symbol (not to be confused with `NULL_SYMBOL`).
    pub fn intern(&self, s: &str) -> SymbolId {
        if let Some(id) = self.by_bytes.get(s) {
            return *id;
        }
        // Lookup-then-insert races are resolved by re-checking under the
        // write lock: two threads may both reach here for the same
        // string, but only one wins the `strings` push.
        let mut strings = self.strings.write().expect("symbol table lock poisoned");
        if let Some(id) = self.by_bytes.get(s) {
            return *id;
        }
        let arc: Arc<str> = Arc::from(s);
        strings.push(Arc::clone(&arc));
        let id = strings.len() as SymbolId;
        self.by_bytes.insert(arc, id);
        id
    }

    /// `None` for `NULL_SYMBOL` or an id never returned by `intern`.
    #[must_use]
    pub fn resolve(&self, id: SymbolId) -> Option<Arc<str>> {
        if id == NULL_SYMBOL {
            return None;
        }
        let strings = self.strings.read().expect("symbol table lock poisoned");
        strings.get((id - 1) as usize).cloned()
    }

    /// O(1) length of the interned string, without resolving its bytes.
    #[must_use]
    pub fn length(&self, id: SymbolId) -> usize {
        self.resolve(id).map_or(0, |s| s.len())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The single process-wide symbol table.
pub static SYMBOLS: Lazy<SymbolTable> = Lazy::new(SymbolTable::new);

#[cfg(test)]
mod symbol_test;

#[cfg(test)]
mod symbol_proptest;
