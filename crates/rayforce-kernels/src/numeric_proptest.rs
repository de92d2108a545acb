// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn i64_add_is_commutative(a: i64, b: i64) {
        prop_assert_eq!(ArithOp::Add.eval_i64(a, b), ArithOp::Add.eval_i64(b, a));
    }

    #[test]
    fn i64_mul_is_commutative(a: i64, b: i64) {
        prop_assert_eq!(ArithOp::Mul.eval_i64(a, b), ArithOp::Mul.eval_i64(b, a));
    }

    #[test]
    fn i64_null_propagates_through_every_op(a: i64) {
        for op in [ArithOp::Add, ArithOp::Sub, ArithOp::Mul, ArithOp::Div] {
            prop_assert_eq!(op.eval_i64(a, i64::MIN), i64::MIN);
            prop_assert_eq!(op.eval_i64(i64::MIN, a), i64::MIN);
        }
    }

    #[test]
    fn i64_division_by_zero_is_null(a: i64) {
        prop_assert_eq!(ArithOp::Div.eval_i64(a, 0), i64::MIN);
    }
}
