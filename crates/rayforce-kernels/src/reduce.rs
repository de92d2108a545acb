// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Reducing operations (§4.5): "walk once, skipping nulls, preserving the
//! input element type; `count` never counts nulls."

use rayforce_core::{RayError, Tag};
use rayforce_value::{Value, Vector};

/// Sums a numeric vector, skipping nulls, returning the input's own
/// element type (I64 stays I64, F64 stays F64).
pub fn sum(v: &Vector) -> Result<Value, RayError> {
    match v.tag() {
        Tag::VecI64 => Ok(Value::I64(v.as_i64().iter().copied().filter(|&n| n != i64::MIN).sum())),
        Tag::VecF64 => Ok(Value::F64(v.as_f64().iter().copied().filter(|f| !f.is_nan()).sum())),
        other => Err(RayError::type_error(format!("cannot sum a {}", other.name()))),
    }
}

/// Minimum of a numeric vector, skipping nulls. `None`/`NULL` if every
/// element is null.
pub fn min(v: &Vector) -> Result<Value, RayError> {
    match v.tag() {
        Tag::VecI64 => {
            let m = v.as_i64().iter().copied().filter(|&n| n != i64::MIN).min();
            Ok(Value::I64(m.unwrap_or(i64::MIN)))
        }
        Tag::VecF64 => {
            let m = v.as_f64().iter().copied().filter(|f| !f.is_nan()).fold(None, |acc, x| match acc {
                None => Some(x),
                Some(a) if x < a => Some(x),
                Some(a) => Some(a),
            });
            Ok(Value::F64(m.unwrap_or(f64::NAN)))
        }
        other => Err(RayError::type_error(format!("cannot take the min of a {}", other.name()))),
    }
}

/// Maximum of a numeric vector, skipping nulls.
pub fn max(v: &Vector) -> Result<Value, RayError> {
    match v.tag() {
        Tag::VecI64 => {
            let m = v.as_i64().iter().copied().filter(|&n| n != i64::MIN).max();
            Ok(Value::I64(m.unwrap_or(i64::MIN)))
        }
        Tag::VecF64 => {
            let m = v.as_f64().iter().copied().filter(|f| !f.is_nan()).fold(None, |acc, x| match acc {
                None => Some(x),
                Some(a) if x > a => Some(x),
                Some(a) => Some(a),
            });
            Ok(Value::F64(m.unwrap_or(f64::NAN)))
        }
        other => Err(RayError::type_error(format!("cannot take the max of a {}", other.name()))),
    }
}

/// Non-null element count. Always returns `I64` regardless of the input's
/// own element type, matching the original engine's `count` primitive.
#[must_use]
pub fn count(v: &Vector) -> i64 {
    let non_null = match v.tag() {
        Tag::VecI64 | Tag::VecTimestamp => v.as_i64().iter().filter(|&&n| n != i64::MIN).count(),
        Tag::VecF64 => v.as_f64().iter().filter(|f| !f.is_nan()).count(),
        Tag::VecSymbol => v.as_symbols().iter().filter(|&&s| s != rayforce_core::NULL_SYMBOL).count(),
        _ => v.len(),
    };
    non_null as i64
}

#[cfg(test)]
mod reduce_test;
