// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;
use rayforce_value::Value;

#[test]
fn i64_null_compares_as_an_ordinary_minimum_value() {
    assert!(CompareOp::Lt.eval_i64(i64::MIN, 5));
    assert!(!CompareOp::Eq.eval_i64(i64::MIN, 5));
    assert!(CompareOp::Eq.eval_i64(i64::MIN, i64::MIN));
}

#[test]
fn f64_nan_equals_only_itself_and_sorts_first() {
    assert!(CompareOp::Eq.eval_f64(f64::NAN, f64::NAN));
    assert!(!CompareOp::Eq.eval_f64(f64::NAN, 1.0));
    assert!(CompareOp::Lt.eval_f64(f64::NAN, 1.0));
    assert!(!CompareOp::Lt.eval_f64(1.0, f64::NAN));
    assert!(CompareOp::Gt.eval_f64(1.0, f64::NAN));
    assert!(!CompareOp::Gt.eval_f64(f64::NAN, 1.0));
}

#[test]
fn f64_le_and_ge_are_consistent_with_lt_and_gt() {
    assert!(CompareOp::Le.eval_f64(1.0, 1.0));
    assert!(CompareOp::Ge.eval_f64(1.0, 1.0));
    assert!(CompareOp::Le.eval_f64(f64::NAN, f64::NAN));
    assert!(CompareOp::Ge.eval_f64(f64::NAN, f64::NAN));
}

#[test]
fn mixed_i64_f64_comparison_widens_to_f64() {
    let r = apply_atoms(CompareOp::Lt, &Value::I64(2), &Value::F64(2.5)).unwrap();
    assert!(matches!(r, Value::B8(true)));
}

#[test]
fn mixed_comparison_treats_integer_null_as_nan() {
    let r = apply_atoms(CompareOp::Eq, &Value::I64(i64::MIN), &Value::F64(f64::NAN)).unwrap();
    assert!(matches!(r, Value::B8(true)));
}

#[test]
fn symbol_equality_is_supported_but_ordering_is_not() {
    let a = rayforce_core::SYMBOLS.intern("a");
    let b = rayforce_core::SYMBOLS.intern("b");
    assert!(matches!(apply_atoms(CompareOp::Eq, &Value::Symbol(a), &Value::Symbol(a)).unwrap(), Value::B8(true)));
    assert!(matches!(apply_atoms(CompareOp::Ne, &Value::Symbol(a), &Value::Symbol(b)).unwrap(), Value::B8(true)));
    assert!(apply_atoms(CompareOp::Lt, &Value::Symbol(a), &Value::Symbol(b)).is_err());
}

#[test]
fn timestamp_ordering_compares_the_raw_encoding() {
    let r = apply_temporal(CompareOp::Gt, &Value::Timestamp(1_000), &Value::Timestamp(400)).unwrap();
    assert!(matches!(r, Value::B8(true)));
}

#[test]
fn date_and_timestamp_do_not_cross_compare() {
    assert!(apply_temporal(CompareOp::Eq, &Value::Date(1), &Value::Timestamp(1)).is_err());
}
