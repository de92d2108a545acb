// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn intern_is_idempotent(s in "\\PC*") {
        let table = SymbolTable::new();
        let first = table.intern(&s);
        let second = table.intern(&s);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn resolve_recovers_the_interned_string(s in "\\PC*") {
        let table = SymbolTable::new();
        let id = table.intern(&s);
        prop_assert_eq!(table.resolve(id).as_deref(), Some(s.as_str()));
    }

    #[test]
    fn length_matches_the_resolved_string(s in "\\PC*") {
        let table = SymbolTable::new();
        let id = table.intern(&s);
        prop_assert_eq!(table.length(id), s.len());
    }
}
