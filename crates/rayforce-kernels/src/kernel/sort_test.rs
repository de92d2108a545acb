// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;
use rayforce_value::Vector;

#[test]
fn sort_indices_ascending() {
    let v = Vector::i64(&[30, 10, 20]).unwrap();
    assert_eq!(sort_indices(&v, true).unwrap(), vec![1, 2, 0]);
}

#[test]
fn sort_indices_descending() {
    let v = Vector::i64(&[30, 10, 20]).unwrap();
    assert_eq!(sort_indices(&v, false).unwrap(), vec![0, 2, 1]);
}

#[test]
fn nulls_sort_to_the_end_regardless_of_direction() {
    let v = Vector::i64(&[5, i64::MIN, 1]).unwrap();
    assert_eq!(sort_indices(&v, true).unwrap(), vec![2, 0, 1]);
    assert_eq!(sort_indices(&v, false).unwrap(), vec![0, 2, 1]);
}

// S5: sort_asc([3.0, NaN, 1.0, 2.0]) -> NaN sorts as this engine's
// smallest float value (CompareOp::Lt's total order), unlike an integer
// null, which sorts to the end regardless of direction.
#[test]
fn sort_asc_sorts_nan_as_the_smallest_key() {
    let v = Vector::f64(&[3.0, f64::NAN, 1.0, 2.0]).unwrap();
    assert_eq!(sort_indices(&v, true).unwrap(), vec![1, 2, 3, 0]);
}

#[test]
fn sort_desc_sorts_nan_last() {
    let v = Vector::f64(&[3.0, f64::NAN, 1.0, 2.0]).unwrap();
    assert_eq!(sort_indices(&v, false).unwrap(), vec![0, 3, 2, 1]);
}

#[test]
fn i32_vectors_sort_without_panicking() {
    let v = Vector::i32(&[30, 10, 20]).unwrap();
    assert_eq!(sort_indices(&v, true).unwrap(), vec![1, 2, 0]);
}

#[test]
fn rank_assigns_ascending_order_positions() {
    let v = Vector::i64(&[30, 10, 20]).unwrap();
    assert_eq!(rank(&v).unwrap(), vec![2, 0, 1]);
}

#[test]
fn group_preserves_first_appearance_order() {
    let v = Vector::i64(&[3, 1, 3, 2, 1]).unwrap();
    let groups = group(&v);
    assert_eq!(groups.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec![3, 1, 2]);
    assert_eq!(groups[0].1, vec![0, 2]);
    assert_eq!(groups[1].1, vec![1, 4]);
    assert_eq!(groups[2].1, vec![3]);
}
