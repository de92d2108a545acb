// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;

#[test]
fn add_dispatches_through_the_kernel_dispatcher() {
    let result = call(Builtin::Add, &[Value::I64(2), Value::I64(3)]).unwrap();
    match result {
        Value::I64(5) => {}
        other => panic!("expected I64(5), got {other:?}"),
    }
}

#[test]
fn wrong_arity_is_an_arity_error() {
    let err = call(Builtin::Add, &[Value::I64(1)]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Arity);
}

#[test]
fn sum_reduces_a_vector() {
    let v = Vector::i64(&[1, 2, 3]).unwrap();
    let result = call(Builtin::Sum, &[Value::Vector(v)]).unwrap();
    match result {
        Value::I64(6) => {}
        other => panic!("expected I64(6), got {other:?}"),
    }
}

#[test]
fn sort_asc_reorders_ascending() {
    let v = Vector::i64(&[3, 1, 2]).unwrap();
    let result = call(Builtin::SortAsc, &[Value::Vector(v)]).unwrap();
    match result {
        Value::Vector(v) => assert_eq!(v.as_i64(), &[1, 2, 3]),
        other => panic!("expected a vector, got {other:?}"),
    }
}

#[test]
fn like_matches_a_glob_pattern() {
    let haystack = Vector::u8(b"hello").unwrap();
    let pattern = Vector::u8(b"h*o").unwrap();
    let result = call(Builtin::Like, &[Value::Vector(haystack), Value::Vector(pattern)]).unwrap();
    match result {
        Value::B8(true) => {}
        other => panic!("expected B8(true), got {other:?}"),
    }
}

#[test]
fn an_unknown_name_does_not_resolve() {
    assert!(Builtin::lookup("frobnicate").is_none());
}

#[test]
fn lt_dispatches_through_the_kernel_dispatcher() {
    let result = call(Builtin::Lt, &[Value::I64(2), Value::I64(3)]).unwrap();
    match result {
        Value::B8(true) => {}
        other => panic!("expected B8(true), got {other:?}"),
    }
}

#[test]
fn eq_over_vectors_broadcasts_elementwise() {
    let a = Vector::i64(&[1, 2, 3]).unwrap();
    let b = Vector::i64(&[1, 0, 3]).unwrap();
    let result = call(Builtin::Eq, &[Value::Vector(a), Value::Vector(b)]).unwrap();
    match result {
        Value::Vector(v) => assert_eq!(v.as_bool(), &[true, false, true]),
        other => panic!("expected a vector, got {other:?}"),
    }
}
