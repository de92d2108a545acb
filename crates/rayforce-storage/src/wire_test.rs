// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;
use rayforce_value::Vector;

#[test]
fn header_round_trips() {
    let h = WireHeader::new(MsgType::Sync, 42);
    let bytes = h.to_bytes();
    assert_eq!(bytes.len(), WIRE_HEADER_SIZE);
    let back = WireHeader::from_bytes(&bytes).unwrap();
    assert_eq!(back, h);
}

#[test]
fn header_rejects_bad_magic() {
    let mut bytes = WireHeader::new(MsgType::Async, 0).to_bytes();
    bytes[0] = 0;
    let err = WireHeader::from_bytes(&bytes).unwrap_err();
    assert_eq!(err.kind, rayforce_core::ErrorKind::Parse);
}

#[test]
fn atom_round_trips() {
    let (v, consumed) = de_raw(&ser_raw(&Value::I64(-7)).unwrap()).unwrap();
    assert!(matches!(v, Value::I64(-7)));
    assert_eq!(consumed, 9); // 1 tag byte + 8 payload bytes
}

#[test]
fn numeric_vector_round_trips() {
    let v = Value::Vector(Vector::i64(&[1, 2, 3]).unwrap());
    let (back, _) = de_raw(&ser_raw(&v).unwrap()).unwrap();
    match back {
        Value::Vector(out) => assert_eq!(out.as_i64(), &[1, 2, 3]),
        other => panic!("expected a vector, got {other:?}"),
    }
}

#[test]
fn string_vector_round_trips() {
    let v = Value::Vector(Vector::string("hello").unwrap());
    let (back, _) = de_raw(&ser_raw(&v).unwrap()).unwrap();
    match back {
        Value::Vector(out) => assert_eq!(out.as_str(), "hello"),
        other => panic!("expected a string vector, got {other:?}"),
    }
}

#[test]
fn symbol_atom_round_trips_through_the_global_interner() {
    let id = rayforce_core::SYMBOLS.intern("roundtrip-symbol");
    let (back, _) = de_raw(&ser_raw(&Value::Symbol(id)).unwrap()).unwrap();
    match back {
        Value::Symbol(back_id) => assert_eq!(back_id, id),
        other => panic!("expected a symbol, got {other:?}"),
    }
}

#[test]
fn list_round_trips() {
    let list = ListVec::new(vec![Value::I64(1), Value::F64(2.5)]);
    let (back, _) = de_raw(&ser_raw(&Value::List(list)).unwrap()).unwrap();
    match back {
        Value::List(l) => assert_eq!(l.as_slice().len(), 2),
        other => panic!("expected a list, got {other:?}"),
    }
}

#[test]
fn table_round_trips_shape() {
    let names = Vector::symbol(&[rayforce_core::SYMBOLS.intern("a"), rayforce_core::SYMBOLS.intern("b")]).unwrap();
    let columns = vec![
        Value::Vector(Vector::i64(&[1, 2]).unwrap()),
        Value::Vector(Vector::i64(&[3, 4]).unwrap()),
    ];
    let table = Table::new(names, columns).unwrap();
    let (back, _) = de_raw(&ser_raw(&Value::Table(table)).unwrap()).unwrap();
    match back {
        Value::Table(t) => assert_eq!(t.row_count(), 2),
        other => panic!("expected a table, got {other:?}"),
    }
}

#[test]
fn error_round_trips() {
    let err = RayError::new(ErrorKind::Domain, "out of range");
    let (back, _) = de_raw(&ser_raw(&Value::Error(ErrorValue::new(err))).unwrap()).unwrap();
    match back {
        Value::Error(e) => {
            assert_eq!(e.inner().kind, ErrorKind::Domain);
            assert_eq!(e.inner().message, "out of range");
        }
        other => panic!("expected an error value, got {other:?}"),
    }
}

#[test]
fn enum_has_no_wire_representation() {
    let domain = Vector::symbol(&[1, 2]).unwrap();
    let ids = Vector::i64(&[0, 1]).unwrap();
    let e = rayforce_value::Enum::new(9, domain, ids).unwrap();
    let err = ser_raw(&Value::Enum(e)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotSupported);
}
