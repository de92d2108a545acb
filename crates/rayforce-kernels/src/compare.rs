// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Scalar comparison kernels (§4.5's numeric/temporal coercion, applied to
//! `ops.h`'s `EQ*`/`NE*`/`LT*`/`GT*`/`LE*`/`GE*` catalogue rather than the
//! `ADD*`/`SUB*`/... one [`crate::numeric`] already covers).

use rayforce_core::RayError;
use rayforce_value::Value;

/// The comparison primitives the dispatcher can apply elementwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    /// `i64` inner loop. Unlike the arithmetic ops, a null operand never
    /// propagates to a null result: `i64::MIN` compares as any other value
    /// (ops.h's `EQI64`/`LTI64`/... never special-case it).
    #[must_use]
    pub fn eval_i64(self, a: i64, b: i64) -> bool {
        match self {
            Self::Eq => a == b,
            Self::Ne => a != b,
            Self::Lt => a < b,
            Self::Gt => a > b,
            Self::Le => a <= b,
            Self::Ge => a >= b,
        }
    }

    /// `f64` inner loop, mirroring `EQF64`/`LTF64`/`GTF64`: `NaN` (this
    /// engine's float null) sorts before every other value and equals only
    /// itself, rather than the IEEE-754 default of comparing false against
    /// everything including itself.
    #[must_use]
    pub fn eval_f64(self, a: f64, b: f64) -> bool {
        match self {
            Self::Eq => {
                if a.is_nan() {
                    b.is_nan()
                } else if b.is_nan() {
                    false
                } else {
                    a == b
                }
            }
            Self::Ne => !Self::Eq.eval_f64(a, b),
            Self::Lt => {
                if a.is_nan() {
                    !b.is_nan()
                } else if b.is_nan() {
                    false
                } else {
                    a < b
                }
            }
            Self::Gt => {
                if b.is_nan() {
                    !a.is_nan()
                } else if a.is_nan() {
                    false
                } else {
                    a > b
                }
            }
            Self::Le => !Self::Gt.eval_f64(a, b),
            Self::Ge => !Self::Lt.eval_f64(a, b),
        }
    }
}

/// Applies one comparison to a pair of atoms, with the same mixed
/// I64xF64 widening [`crate::numeric::apply_atoms`] uses for arithmetic.
pub fn apply_atoms(op: CompareOp, a: &Value, b: &Value) -> Result<Value, RayError> {
    match (a, b) {
        (Value::I64(x), Value::I64(y)) => Ok(Value::B8(op.eval_i64(*x, *y))),
        (Value::F64(x), Value::F64(y)) => Ok(Value::B8(op.eval_f64(*x, *y))),
        (Value::I64(x), Value::F64(y)) => Ok(Value::B8(op.eval_f64(i64_to_f64_null_aware(*x), *y))),
        (Value::F64(x), Value::I64(y)) => Ok(Value::B8(op.eval_f64(*x, i64_to_f64_null_aware(*y)))),
        (Value::I32(x), Value::I32(y)) => Ok(Value::B8(op.eval_i64(i64::from(*x), i64::from(*y)))),
        (Value::C8(x), Value::C8(y)) => Ok(Value::B8(op.eval_i64(i64::from(*x), i64::from(*y)))),
        (Value::Symbol(x), Value::Symbol(y)) => Ok(Value::B8(match op {
            CompareOp::Eq => x == y,
            CompareOp::Ne => x != y,
            other => return Err(RayError::type_error(format!("symbols have no {other:?} ordering"))),
        })),
        (Value::Guid(x), Value::Guid(y)) => Ok(Value::B8(match op {
            CompareOp::Eq => x == y,
            CompareOp::Ne => x != y,
            other => return Err(RayError::type_error(format!("guids have no {other:?} ordering"))),
        })),
        (lhs, rhs) => Err(RayError::type_error(format!(
            "no comparison kernel for {} {} {}",
            lhs.type_name(),
            compare_symbol(op),
            rhs.type_name()
        ))),
    }
}

/// Temporal comparison (§4.5): `DATE`/`TIME`/`TIMESTAMP` compare against
/// their own kind using the plain integer ordering of their encoding.
pub fn apply_temporal(op: CompareOp, a: &Value, b: &Value) -> Result<Value, RayError> {
    match (a, b) {
        (Value::Date(x), Value::Date(y)) => Ok(Value::B8(op.eval_i64(i64::from(*x), i64::from(*y)))),
        (Value::Time(x), Value::Time(y)) => Ok(Value::B8(op.eval_i64(i64::from(*x), i64::from(*y)))),
        (Value::Timestamp(x), Value::Timestamp(y)) => Ok(Value::B8(op.eval_i64(*x, *y))),
        (lhs, rhs) => Err(RayError::type_error(format!(
            "no temporal comparison kernel for {} {} {}",
            lhs.type_name(),
            compare_symbol(op),
            rhs.type_name()
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

fn compare_symbol(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "=",
        CompareOp::Ne => "<>",
        CompareOp::Lt => "<",
        CompareOp::Gt => ">",
        CompareOp::Le => "<=",
        CompareOp::Ge => ">=",
    }
}

#[cfg(test)]
mod compare_test;

#[cfg(test)]
mod compare_proptest;
