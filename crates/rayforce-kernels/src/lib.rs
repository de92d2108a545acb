// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Primitive kernels and their dispatcher (§4.5, §4.6): numeric coercion,
//! null propagation, temporal promotion, enum/maplist peeling, reducing
//! operations, sort/rank, and string matching.

mod compare;
mod dispatch;
pub mod kernel;
mod numeric;
mod reduce;

pub use compare::CompareOp;
pub use dispatch::{binary, unary, BinOp, UnaryOp};
pub use kernel::sort::{group, rank, sort_indices};
pub use kernel::string::like;
pub use numeric::ArithOp;
pub use reduce::{count, max, min, sum};
