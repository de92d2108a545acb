// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Sort, rank, and group-by-value, grounded on `sort.c`'s asc/desc
//! partitioning and `ops_rank` (seed scenario S5). Rust's pattern-defeating
//! quicksort (`slice::sort_by`) replaces the hand-rolled quick/heap/counting
//! sort selection, since the original's size-based strategy switch exists
//! to work around C's lack of one.

use crate::compare::CompareOp;
use rayforce_core::{RayError, Tag};
use rayforce_value::{Value, Vector};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Returns the permutation of `0..v.len()` that would sort `v` ascending
/// (or descending).
///
/// Integer-ish element types (`I64`/`I32`/`I16`/`U8`/`DATE`/`TIME`/
/// `TIMESTAMP`) sort their null sentinel to the end regardless of
/// direction, same as the original's treatment of `i64::MIN` as "not a
/// real value" for ordering purposes. `F64` has no such exception: its
/// null is `NaN`, and [`CompareOp`]'s total order already sorts `NaN`
/// before every other value (seed scenario S5), so it's used directly
/// rather than re-deriving a separate end-of-list rule for floats.
pub fn sort_indices(v: &Vector, ascending: bool) -> Result<Vec<usize>, RayError> {
    let mut idx: Vec<usize> = (0..v.len()).collect();
    match v.tag() {
        Tag::VecF64 => {
            let data = v.as_f64();
            idx.sort_by(|&a, &b| {
                let ord = f64_order(data[a], data[b]);
                if ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        Tag::VecI64 | Tag::VecI32 | Tag::VecI16 | Tag::VecU8 | Tag::VecDate | Tag::VecTime | Tag::VecTimestamp => {
            let data: Vec<Value> = (0..v.len()).map(|i| v.element(i)).collect();
            idx.sort_by(|&a, &b| int_order(&data[a], &data[b], ascending));
        }
        other => return Err(RayError::type_error(format!("no ordering for {other:?} vectors"))),
    }
    Ok(idx)
}

/// Total order over `f64` matching [`CompareOp::Lt`]'s `NaN`-sorts-first
/// convention (`compare.rs`), rather than `f64`'s own partial order where
/// every comparison against `NaN` is false.
fn f64_order(x: f64, y: f64) -> Ordering {
    if CompareOp::Lt.eval_f64(x, y) {
        Ordering::Less
    } else if CompareOp::Lt.eval_f64(y, x) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Ordering for the integer-family element types, nulls sorted to the
/// end regardless of direction.
fn int_order(a: &Value, b: &Value, ascending: bool) -> Ordering {
    match (is_int_null(a), is_int_null(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let (x, y) = (int_value(a), int_value(b));
            if ascending {
                x.cmp(&y)
            } else {
                y.cmp(&x)
            }
        }
    }
}

fn is_int_null(v: &Value) -> bool {
    match v {
        Value::I64(n) | Value::Timestamp(n) => *n == i64::MIN,
        Value::I32(n) | Value::Date(n) | Value::Time(n) => *n == i32::MIN,
        Value::I16(n) => *n == i16::MIN,
        _ => false,
    }
}

fn int_value(v: &Value) -> i64 {
    match v {
        Value::I64(n) | Value::Timestamp(n) => *n,
        Value::I32(n) | Value::Date(n) | Value::Time(n) => i64::from(*n),
        Value::I16(n) => i64::from(*n),
        Value::U8(n) => i64::from(*n),
        other => unreachable!("int_order only ever compares integer-family elements, got {other:?}"),
    }
}

/// For each element, its 0-based rank if `v` were sorted ascending (ties
/// broken by original position, i.e. a stable rank). Nulls rank last.
pub fn rank(v: &Vector) -> Result<Vec<u64>, RayError> {
    let order = sort_indices(v, true)?;
    let mut ranks = vec![0u64; order.len()];
    for (position, &original_index) in order.iter().enumerate() {
        ranks[original_index] = position as u64;
    }
    Ok(ranks)
}

/// Groups element positions by value, insertion-ordered within each
/// group, mirroring the partitioner's `FN_GROUP_MAP` contract (§4.6).
#[must_use]
pub fn group(v: &Vector) -> Vec<(i64, Vec<usize>)> {
    let data = v.as_i64();
    let mut order: Vec<i64> = Vec::new();
    let mut groups: HashMap<i64, Vec<usize>> = HashMap::new();
    for (i, &x) in data.iter().enumerate() {
        groups.entry(x).or_insert_with(|| {
            order.push(x);
            Vec::new()
        });
        groups.get_mut(&x).expect("just inserted").push(i);
    }
    order.into_iter().map(|key| (key, groups.remove(&key).expect("key was just pushed"))).collect()
}

#[cfg(test)]
mod sort_test;
