// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;

#[test]
fn intern_is_idempotent() {
    let table = SymbolTable::new();
    let a = table.intern("hello");
    let b = table.intern("hello");
    assert_eq!(a, b);
    assert_ne!(a, NULL_SYMBOL);
}

#[test]
fn distinct_strings_get_distinct_ids() {
    let table = SymbolTable::new();
    let a = table.intern("foo");
    let b = table.intern("bar");
    assert_ne!(a, b);
}

#[test]
fn resolve_round_trips() {
    let table = SymbolTable::new();
    let id = table.intern("round-trip");
    assert_eq!(table.resolve(id).as_deref(), Some("round-trip"));
}

#[test]
fn empty_string_is_a_valid_distinct_symbol() {
    let table = SymbolTable::new();
    let id = table.intern("");
    assert_ne!(id, NULL_SYMBOL);
    assert_eq!(table.length(id), 0);
}

#[test]
fn null_symbol_does_not_resolve() {
    let table = SymbolTable::new();
    assert!(table.resolve(NULL_SYMBOL).is_none());
}

#[test]
fn length_is_constant_time_accessible_without_full_resolve() {
    let table = SymbolTable::new();
    let id = table.intern("twelve chars");
    assert_eq!(table.length(id), 12);
}

#[test]
fn concurrent_intern_converges_on_one_id() {
    use std::sync::Arc;
    let table = Arc::new(SymbolTable::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let table = Arc::clone(&table);
            std::thread::spawn(move || table.intern("shared"))
        })
        .collect();
    let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(ids.iter().all(|&id| id == ids[0]));
}
