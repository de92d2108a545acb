// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The dispatcher (§4.6): recursive LIST/MAPLIST/ENUM walk, atom
//! broadcast, and heterogeneity downgrade to `List`.

use crate::compare::{self, CompareOp};
use crate::numeric::{self, ArithOp};
use rayforce_core::RayError;
use rayforce_value::{ListVec, Value, Vector};

/// A binary primitive, carrying the arithmetic or comparison op it applies
/// elementwise. All of this crate's binary kernels are `FN_ATOMIC` (§4.6):
/// they broadcast across `List`s and `Vector`s, requiring matching lengths
/// when both sides are non-scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Arith(ArithOp),
    Compare(CompareOp),
}

/// A unary primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Abs,
    Sqrt,
}

/// Dispatches a binary primitive over a pair of values, recursing through
/// `List`, `Vector`, and peeling `Enum` indirection before applying the
/// scalar kernel (§4.5, §4.6).
///
/// `MapList`'s indirection is peeled by the storage layer before values
/// reach the arithmetic kernels; blobs of bytes have no numeric meaning,
/// so this dispatcher never receives a bare `MapList` operand in practice.
pub fn binary(op: BinOp, a: &Value, b: &Value) -> Result<Value, RayError> {
    let a = peel(a);
    let b = peel(b);

    match (&a, &b) {
        (Value::List(la), Value::List(lb)) => {
            if la.as_slice().len() != lb.as_slice().len() {
                return Err(RayError::length_error("binary op over two lists requires equal length"));
            }
            let results: Result<Vec<Value>, RayError> = la
                .as_slice()
                .iter()
                .zip(lb.as_slice())
                .map(|(x, y)| binary(op, x, y))
                .collect();
            Ok(wrap_results(results?))
        }
        (Value::List(la), _) => {
            let results: Result<Vec<Value>, RayError> = la.as_slice().iter().map(|x| binary(op, x, &b)).collect();
            Ok(wrap_results(results?))
        }
        (_, Value::List(lb)) => {
            let results: Result<Vec<Value>, RayError> = lb.as_slice().iter().map(|y| binary(op, &a, y)).collect();
            Ok(wrap_results(results?))
        }
        (Value::Vector(va), Value::Vector(vb)) => {
            if va.len() != vb.len() {
                return Err(RayError::length_error("binary op over two vectors requires equal length"));
            }
            if va.is_empty() {
                // §8 boundary behavior: a zero-length operand returns a
                // zero-length vector rather than downgrading through the
                // untyped empty-`List` path `wrap_results` falls back to.
                return Ok(Value::Vector(va.clone()));
            }
            let results: Result<Vec<Value>, RayError> = (0..va.len())
                .map(|i| apply_scalar(op, &va.element(i), &vb.element(i)))
                .collect();
            Ok(wrap_results(results?))
        }
        (Value::Vector(va), _) => {
            if va.is_empty() {
                return Ok(Value::Vector(va.clone()));
            }
            let results: Result<Vec<Value>, RayError> =
                (0..va.len()).map(|i| apply_scalar(op, &va.element(i), &b)).collect();
            Ok(wrap_results(results?))
        }
        (_, Value::Vector(vb)) => {
            if vb.is_empty() {
                return Ok(Value::Vector(vb.clone()));
            }
            let results: Result<Vec<Value>, RayError> =
                (0..vb.len()).map(|i| apply_scalar(op, &a, &vb.element(i))).collect();
            Ok(wrap_results(results?))
        }
        _ => apply_scalar(op, &a, &b),
    }
}

/// Dispatches a unary primitive, recursing through `List`/`Vector` the
/// same way as [`binary`].
pub fn unary(op: UnaryOp, a: &Value) -> Result<Value, RayError> {
    let a = peel(a);
    match &a {
        Value::List(l) => {
            let results: Result<Vec<Value>, RayError> = l.as_slice().iter().map(|x| unary(op, x)).collect();
            Ok(wrap_results(results?))
        }
        Value::Vector(v) => {
            let results: Result<Vec<Value>, RayError> = (0..v.len()).map(|i| apply_unary(op, &v.element(i))).collect();
            Ok(wrap_results(results?))
        }
        other => apply_unary(op, other),
    }
}

fn apply_scalar(op: BinOp, a: &Value, b: &Value) -> Result<Value, RayError> {
    match op {
        BinOp::Arith(arith) => {
            if is_temporal_pair(a, b) {
                numeric::apply_temporal(arith, a, b)
            } else {
                numeric::apply_atoms(arith, a, b)
            }
        }
        BinOp::Compare(cmp) => {
            if is_temporal_pair(a, b) {
                compare::apply_temporal(cmp, a, b)
            } else {
                compare::apply_atoms(cmp, a, b)
            }
        }
    }
}

fn is_temporal_pair(a: &Value, b: &Value) -> bool {
    matches!(a, Value::Date(_) | Value::Time(_) | Value::Timestamp(_))
        || matches!(b, Value::Date(_) | Value::Time(_) | Value::Timestamp(_))
}

fn apply_unary(op: UnaryOp, a: &Value) -> Result<Value, RayError> {
    match (op, a) {
        (UnaryOp::Neg, Value::I64(n)) => Ok(Value::I64(if *n == i64::MIN { i64::MIN } else { -n })),
        (UnaryOp::Neg, Value::F64(f)) => Ok(Value::F64(-f)),
        (UnaryOp::Abs, Value::I64(n)) => Ok(Value::I64(if *n == i64::MIN { i64::MIN } else { n.abs() })),
        (UnaryOp::Abs, Value::F64(f)) => Ok(Value::F64(f.abs())),
        (UnaryOp::Sqrt, Value::F64(f)) => {
            if f.is_nan() {
                Ok(Value::F64(f64::NAN))
            } else if *f < 0.0 {
                Err(RayError::new(rayforce_core::ErrorKind::Domain, "sqrt of a negative number"))
            } else {
                Ok(Value::F64(f.sqrt()))
            }
        }
        (UnaryOp::Sqrt, Value::I64(n)) => apply_unary(UnaryOp::Sqrt, &Value::F64(numeric_f64_of_i64(*n))),
        (_, other) => Err(RayError::type_error(format!("no unary kernel for {}", other.type_name()))),
    }
}

fn numeric_f64_of_i64(n: i64) -> f64 {
    if n == i64::MIN {
        f64::NAN
    } else {
        n as f64
    }
}

/// Peels `Enum` indirection, materializing the resolved symbol vector
/// (§4.5: "the kernel peels off the indirection ... before recursing").
fn peel(v: &Value) -> Value {
    match v {
        Value::Enum(e) => Value::Vector(e.resolve()),
        other => other.clone(),
    }
}

/// Collects elementwise results into a `Vector` when every result shares
/// one tag, downgrading to `List` otherwise (§4.6).
fn wrap_results(results: Vec<Value>) -> Value {
    if results.iter().any(Value::is_error) {
        return results.into_iter().find(Value::is_error).expect("checked any() above");
    }
    match Vector::from_values(&results) {
        Some(v) => Value::Vector(v),
        None => Value::List(ListVec::new(results)),
    }
}

#[cfg(test)]
mod dispatch_test;
