// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;
use rayforce_value::Vector;

#[test]
fn sum_skips_nulls() {
    let v = Vector::i64(&[1, i64::MIN, 3]).unwrap();
    assert!(matches!(sum(&v).unwrap(), Value::I64(4)));
}

#[test]
fn min_and_max_skip_nulls() {
    let v = Vector::i64(&[5, i64::MIN, 1, 9]).unwrap();
    assert!(matches!(min(&v).unwrap(), Value::I64(1)));
    assert!(matches!(max(&v).unwrap(), Value::I64(9)));
}

#[test]
fn count_never_counts_nulls() {
    let v = Vector::i64(&[1, i64::MIN, i64::MIN, 4]).unwrap();
    assert_eq!(count(&v), 2);
}

#[test]
fn count_of_a_vector_with_no_null_concept_is_its_length() {
    let v = Vector::u8(&[1, 2, 3]).unwrap();
    assert_eq!(count(&v), 3);
}

#[test]
fn f64_min_skips_nan() {
    let v = Vector::f64(&[3.0, f64::NAN, 1.0]).unwrap();
    match min(&v).unwrap() {
        Value::F64(n) => assert!((n - 1.0).abs() < f64::EPSILON),
        other => panic!("expected F64, got {other:?}"),
    }
}
