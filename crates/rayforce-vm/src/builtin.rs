// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The builtin-name dispatch table (§4.9 item 3: "built-in →
//! `unary_call`/`binary_call`/`vary_call`"). Names and grouping are
//! grounded on `original_source/core/ops.h`'s macro catalogue
//! (`ADD*`/`SUB*`/`MUL*`/`DIV*`, `EQ*`/`NE*`/`LT*`/`GT*`/`LE*`/`GE*`,
//! `ops_rank`, `ops_count`) and `rayforce-kernels`'s existing
//! `BinOp`/`UnaryOp` split.

use rayforce_core::{ErrorKind, RayError};
use rayforce_kernels::{self, ArithOp, BinOp, CompareOp, UnaryOp};
use rayforce_value::{Value, Vector};

/// A name resolved to one of `rayforce-kernels`'s primitive entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Abs,
    Sqrt,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Sum,
    Min,
    Max,
    Count,
    SortAsc,
    SortDesc,
    Rank,
    Group,
    Like,
}

impl Builtin {
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "add" => Self::Add,
            "sub" => Self::Sub,
            "mul" => Self::Mul,
            "div" => Self::Div,
            "neg" => Self::Neg,
            "abs" => Self::Abs,
            "sqrt" => Self::Sqrt,
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "lt" => Self::Lt,
            "gt" => Self::Gt,
            "le" => Self::Le,
            "ge" => Self::Ge,
            "sum" => Self::Sum,
            "min" => Self::Min,
            "max" => Self::Max,
            "count" => Self::Count,
            "sort-asc" => Self::SortAsc,
            "sort-desc" => Self::SortDesc,
            "rank" => Self::Rank,
            "group" => Self::Group,
            "like" => Self::Like,
            _ => return None,
        })
    }

    /// Declared argument count, checked before the kernel runs (§7's
    /// `ARITY` error kind).
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Like | Self::Eq | Self::Ne | Self::Lt | Self::Gt
            | Self::Le | Self::Ge => 2,
            Self::Neg | Self::Abs | Self::Sqrt | Self::Sum | Self::Min | Self::Max | Self::Count | Self::SortAsc
            | Self::SortDesc | Self::Rank | Self::Group => 1,
        }
    }
}

/// Applies `b` to already-evaluated `args`, checking arity first.
pub fn call(b: Builtin, args: &[Value]) -> Result<Value, RayError> {
    if args.len() != b.arity() {
        return Err(RayError::arity_error(format!(
            "{b:?} expects {} argument(s), got {}",
            b.arity(),
            args.len()
        )));
    }
    match b {
        Builtin::Add => rayforce_kernels::binary(BinOp::Arith(ArithOp::Add), &args[0], &args[1]),
        Builtin::Sub => rayforce_kernels::binary(BinOp::Arith(ArithOp::Sub), &args[0], &args[1]),
        Builtin::Mul => rayforce_kernels::binary(BinOp::Arith(ArithOp::Mul), &args[0], &args[1]),
        Builtin::Div => rayforce_kernels::binary(BinOp::Arith(ArithOp::Div), &args[0], &args[1]),
        Builtin::Neg => rayforce_kernels::unary(UnaryOp::Neg, &args[0]),
        Builtin::Abs => rayforce_kernels::unary(UnaryOp::Abs, &args[0]),
        Builtin::Sqrt => rayforce_kernels::unary(UnaryOp::Sqrt, &args[0]),
        Builtin::Eq => rayforce_kernels::binary(BinOp::Compare(CompareOp::Eq), &args[0], &args[1]),
        Builtin::Ne => rayforce_kernels::binary(BinOp::Compare(CompareOp::Ne), &args[0], &args[1]),
        Builtin::Lt => rayforce_kernels::binary(BinOp::Compare(CompareOp::Lt), &args[0], &args[1]),
        Builtin::Gt => rayforce_kernels::binary(BinOp::Compare(CompareOp::Gt), &args[0], &args[1]),
        Builtin::Le => rayforce_kernels::binary(BinOp::Compare(CompareOp::Le), &args[0], &args[1]),
        Builtin::Ge => rayforce_kernels::binary(BinOp::Compare(CompareOp::Ge), &args[0], &args[1]),
        Builtin::Sum => rayforce_kernels::sum(&as_vector(&args[0])?),
        Builtin::Min => rayforce_kernels::min(&as_vector(&args[0])?),
        Builtin::Max => rayforce_kernels::max(&as_vector(&args[0])?),
        Builtin::Count => Ok(Value::I64(rayforce_kernels::count(&as_vector(&args[0])?))),
        Builtin::SortAsc => sort(&args[0], true),
        Builtin::SortDesc => sort(&args[0], false),
        Builtin::Rank => {
            let ranks = rayforce_kernels::rank(&as_vector(&args[0])?)?;
            let ranks: Vec<i64> = ranks.iter().map(|&r| r as i64).collect();
            Ok(Value::Vector(
                Vector::i64(&ranks).ok_or_else(|| RayError::new(ErrorKind::Memory, "failed to allocate rank vector"))?,
            ))
        }
        Builtin::Group => {
            let groups = rayforce_kernels::group(&as_vector(&args[0])?);
            let rows: Vec<Value> = groups
                .into_iter()
                .map(|(_, idxs)| {
                    let idxs: Vec<i64> = idxs.into_iter().map(|i| i as i64).collect();
                    Vector::i64(&idxs).map(Value::Vector)
                })
                .collect::<Option<Vec<Value>>>()
                .ok_or_else(|| RayError::new(ErrorKind::Memory, "failed to allocate group index vectors"))?;
            Ok(Value::List(rayforce_value::ListVec::new(rows)))
        }
        Builtin::Like => {
            let haystack = as_vector(&args[0])?;
            let pattern = as_vector(&args[1])?;
            Ok(Value::B8(rayforce_kernels::like(haystack.raw_payload(), pattern.raw_payload())))
        }
    }
}

fn sort(v: &Value, ascending: bool) -> Result<Value, RayError> {
    let vec = as_vector(v)?;
    let order = rayforce_kernels::sort_indices(&vec, ascending)?;
    let sorted: Vec<Value> = order.into_iter().map(|i| vec.element(i)).collect();
    Vector::from_values(&sorted)
        .map(Value::Vector)
        .ok_or_else(|| RayError::new(ErrorKind::Memory, "failed to allocate sorted vector"))
}

fn as_vector(v: &Value) -> Result<Vector, RayError> {
    match v {
        Value::Vector(vec) => Ok(vec.clone()),
        Value::Enum(e) => Ok(e.resolve()),
        other => Err(RayError::type_error(format!("expected a vector, got {}", other.type_name()))),
    }
}

#[cfg(test)]
mod builtin_test;
