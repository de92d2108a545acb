// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;

#[test]
fn every_documented_head_resolves() {
    let names = ["cond", "timer", "set", "let", "and", "or", "timeit"];
    for name in names {
        assert!(SpecialForm::lookup(name).is_some(), "{name} should resolve");
    }
}

#[test]
fn an_ordinary_name_does_not_resolve() {
    assert!(SpecialForm::lookup("add").is_none());
    assert!(SpecialForm::lookup("").is_none());
}
