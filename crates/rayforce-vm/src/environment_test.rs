// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;
use rayforce_core::SYMBOLS;
use rayforce_value::Lambda;

#[test]
fn get_returns_none_for_an_unbound_name() {
    let env = Environment::new();
    assert!(env.get(SYMBOLS.intern("x")).is_none());
}

#[test]
fn set_then_get_round_trips() {
    let mut env = Environment::new();
    let x = SYMBOLS.intern("x");
    env.set(x, Value::I64(42));
    match env.get(x) {
        Some(Value::I64(42)) => {}
        other => panic!("expected I64(42), got {other:?}"),
    }
}

#[test]
fn binding_an_unnamed_lambda_attaches_the_binding_name() {
    let mut env = Environment::new();
    let f = SYMBOLS.intern("f");
    let lambda = Lambda::new(vec![], vec![], Value::Null, vec![]);
    assert!(lambda.name().is_none());
    env.set(f, Value::Lambda(lambda));
    match env.get(f) {
        Some(Value::Lambda(l)) => assert_eq!(l.name(), Some(f)),
        other => panic!("expected a named lambda, got {other:?}"),
    }
}

#[test]
fn binding_an_already_named_lambda_keeps_its_original_name() {
    let mut env = Environment::new();
    let original = SYMBOLS.intern("original-name");
    let alias = SYMBOLS.intern("alias");
    let lambda = Lambda::new(vec![], vec![], Value::Null, vec![]).with_name(original);
    env.set(alias, Value::Lambda(lambda));
    match env.get(alias) {
        Some(Value::Lambda(l)) => assert_eq!(l.name(), Some(original)),
        other => panic!("expected a named lambda, got {other:?}"),
    }
}

#[test]
fn type_registry_is_two_way() {
    let mut env = Environment::new();
    let name = SYMBOLS.intern("int");
    env.register_type(name, rayforce_core::Tag::I64);
    assert_eq!(env.type_of_name(name), Some(rayforce_core::Tag::I64));
    assert_eq!(env.name_of_type(rayforce_core::Tag::I64), Some(name));
}

#[test]
fn clone_is_a_true_snapshot_independent_of_the_original() {
    let mut env = Environment::new();
    let x = SYMBOLS.intern("snapshot-x");
    env.set(x, Value::I64(1));
    let mut snapshot = env.clone();
    snapshot.set(x, Value::I64(2));
    match env.get(x) {
        Some(Value::I64(1)) => {}
        other => panic!("original must be unaffected by snapshot mutation, got {other:?}"),
    }
    match snapshot.get(x) {
        Some(Value::I64(2)) => {}
        other => panic!("expected snapshot to see its own write, got {other:?}"),
    }
}
