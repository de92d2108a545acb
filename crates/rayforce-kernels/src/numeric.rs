// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Scalar arithmetic kernels: null propagation and numeric/temporal
//! coercion for a single pair of atoms (§4.5). The vector/broadcast walk
//! lives in [`crate::dispatch`].

use rayforce_core::RayError;
use rayforce_value::Value;

/// The arithmetic primitives the dispatcher can apply elementwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    /// `i64` inner loop. Division by zero and either-operand-null both
    /// yield the `i64` null sentinel (§4.5: "Division by zero yields NULL").
    #[must_use]
    pub fn eval_i64(self, a: i64, b: i64) -> i64 {
        if a == i64::MIN || b == i64::MIN {
            return i64::MIN;
        }
        match self {
            Self::Add => a.wrapping_add(b),
            Self::Sub => a.wrapping_sub(b),
            Self::Mul => a.wrapping_mul(b),
            Self::Div => {
                if b == 0 {
                    i64::MIN
                } else {
                    a / b
                }
            }
        }
    }

    /// `f64` inner loop. `NaN` already propagates through IEEE-754 math on
    /// its own; zero-division is steered to `NaN` explicitly to match the
    /// integer rule above.
    #[must_use]
    pub fn eval_f64(self, a: f64, b: f64) -> f64 {
        if a.is_nan() || b.is_nan() {
            return f64::NAN;
        }
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => {
                if b == 0.0 {
                    f64::NAN
                } else {
                    a / b
                }
            }
        }
    }
}

/// Applies one arithmetic op to a pair of numeric atoms, with the mixed
/// I64xF64 promotion rule from §4.5 ("mixed I64xF64 widens to F64").
///
/// `Sub` keeps the preserved quirk documented in `DESIGN.md` Open Question
/// 1: a mixed I64/F64 subtraction still computes in `f64` internally, but
/// when the left operand is the declared-I64 side the result is narrowed
/// back to I64 rather than staying F64 like every other mixed op. This
/// mirrors the original engine's behavior rather than "fixing" it.
pub fn apply_atoms(op: ArithOp, a: &Value, b: &Value) -> Result<Value, RayError> {
    match (a, b) {
        (Value::I64(x), Value::I64(y)) => Ok(Value::I64(op.eval_i64(*x, *y))),
        (Value::F64(x), Value::F64(y)) => Ok(Value::F64(op.eval_f64(*x, *y))),
        (Value::I64(x), Value::F64(y)) => {
            let r = op.eval_f64(i64_to_f64_null_aware(*x), *y);
            Ok(if op == ArithOp::Sub {
                Value::I64(f64_to_i64_null_aware(r))
            } else {
                Value::F64(r)
            })
        }
        (Value::F64(x), Value::I64(y)) => {
            let r = op.eval_f64(*x, i64_to_f64_null_aware(*y));
            Ok(Value::F64(r))
        }
        (Value::I32(x), Value::I32(y)) => Ok(Value::I32(narrow_i32(op.eval_i64(i64::from(*x), i64::from(*y))))),
        (lhs, rhs) => Err(RayError::type_error(format!(
            "no numeric kernel for {} {} {}",
            lhs.type_name(),
            arith_symbol(op),
            rhs.type_name()
        ))),
    }
}

/// Temporal promotion (§4.5): `I64 + TIMESTAMP -> TIMESTAMP`,
/// `TIMESTAMP - TIMESTAMP -> I64` (nanoseconds), `DATE + I64 -> DATE`.
pub fn apply_temporal(op: ArithOp, a: &Value, b: &Value) -> Result<Value, RayError> {
    match (a, b, op) {
        (Value::Timestamp(t), Value::Timestamp(u), ArithOp::Sub) => Ok(Value::I64(op.eval_i64(*t, *u))),
        (Value::I64(n), Value::Timestamp(t), ArithOp::Add) | (Value::Timestamp(t), Value::I64(n), ArithOp::Add) => {
            Ok(Value::Timestamp(op.eval_i64(*t, *n)))
        }
        (Value::Date(d), Value::I64(n), ArithOp::Add) | (Value::I64(n), Value::Date(d), ArithOp::Add) => {
            Ok(Value::Date(narrow_i32(op.eval_i64(i64::from(*d), *n))))
        }
        (Value::Date(d), Value::I64(n), ArithOp::Sub) => Ok(Value::Date(narrow_i32(op.eval_i64(i64::from(*d), *n)))),
        _ => Err(RayError::type_error(format!(
            "no temporal kernel for {} {} {}",
            a.type_name(),
            arith_symbol(op),
            b.type_name()
        ))),
    }
}

fn i64_to_f64_null_aware(n: i64) -> f64 {
    if n == i64::MIN {
        f64::NAN
    } else {
        n as f64
    }
}

fn f64_to_i64_null_aware(f: f64) -> i64 {
    if f.is_nan() {
        i64::MIN
    } else {
        f as i64
    }
}

fn narrow_i32(n: i64) -> i32 {
    if n == i64::MIN {
        i32::MIN
    } else {
        n as i32
    }
}

fn arith_symbol(op: ArithOp) -> &'static str {
    match op {
        ArithOp::Add => "+",
        ArithOp::Sub => "-",
        ArithOp::Mul => "*",
        ArithOp::Div => "/",
    }
}

#[cfg(test)]
mod numeric_test;

#[cfg(test)]
mod numeric_proptest;
