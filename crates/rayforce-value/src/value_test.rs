// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;

#[test]
fn atoms_report_their_tag_and_name() {
    let v = Value::I64(42);
    assert_eq!(v.tag(), Some(Tag::I64));
    assert_eq!(v.type_name(), "long");
    assert!(v.is_atom());
}

#[test]
fn null_is_not_an_atom_tag() {
    assert_eq!(Value::Null.tag(), None);
    assert!(Value::Null.is_null());
}

#[test]
fn null_sentinels_are_recognized_per_type() {
    assert!(Value::I64(i64::MIN).is_null());
    assert!(Value::I32(i32::MIN).is_null());
    assert!(Value::F64(f64::NAN).is_null());
    assert!(!Value::I64(0).is_null());
    assert!(!Value::F64(0.0).is_null());
}

#[test]
fn vector_construction_round_trips_elements() {
    let v = Vector::i64(&[1, 2, 3]).expect("alloc");
    assert_eq!(v.as_i64(), &[1, 2, 3]);
    assert_eq!(v.len(), 3);
    assert_eq!(v.tag(), Tag::VecI64);
}

#[test]
fn string_vector_round_trips_utf8() {
    let v = Vector::string("hello").expect("alloc");
    assert_eq!(v.as_str(), "hello");
}

#[test]
fn clone_then_drop_of_a_vector_value_is_a_noop() {
    // §8 universal property 1: drop(clone(x)) == noop. We can't observe
    // the arena's refcount directly from here without an internal
    // accessor, so we check the externally-visible contract instead:
    // the original value is still fully readable after the clone is
    // dropped.
    let v = Value::Vector(Vector::i64(&[10, 20]).unwrap());
    {
        let cloned = v.clone();
        assert_eq!(cloned.len(), Some(2));
    }
    assert_eq!(v.len(), Some(2));
    if let Value::Vector(vec) = &v {
        assert_eq!(vec.as_i64(), &[10, 20]);
    } else {
        panic!("expected a vector value");
    }
}

#[test]
fn list_len_counts_elements_not_bytes() {
    let list = ListVec::new(vec![Value::I64(1), Value::I64(2), Value::I64(3)]);
    let v = Value::List(list);
    assert_eq!(v.len(), Some(3));
}
