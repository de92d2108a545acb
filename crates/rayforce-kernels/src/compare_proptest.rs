// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn i64_lt_and_gt_are_mirror_images(a: i64, b: i64) {
        prop_assert_eq!(CompareOp::Lt.eval_i64(a, b), CompareOp::Gt.eval_i64(b, a));
    }

    #[test]
    fn i64_le_is_lt_or_eq(a: i64, b: i64) {
        prop_assert_eq!(CompareOp::Le.eval_i64(a, b), CompareOp::Lt.eval_i64(a, b) || CompareOp::Eq.eval_i64(a, b));
    }

    #[test]
    fn i64_eq_is_reflexive(a: i64) {
        prop_assert!(CompareOp::Eq.eval_i64(a, a));
    }

    #[test]
    fn f64_total_order_has_exactly_one_relation(a: f64, b: f64) {
        let lt = CompareOp::Lt.eval_f64(a, b);
        let eq = CompareOp::Eq.eval_f64(a, b);
        let gt = CompareOp::Gt.eval_f64(a, b);
        prop_assert_eq!(lt as u8 + eq as u8 + gt as u8, 1);
    }

    #[test]
    fn f64_eq_is_reflexive_even_for_nan(a: f64) {
        prop_assert!(CompareOp::Eq.eval_f64(a, a));
    }

    #[test]
    fn f64_lt_and_gt_are_mirror_images(a: f64, b: f64) {
        prop_assert_eq!(CompareOp::Lt.eval_f64(a, b), CompareOp::Gt.eval_f64(b, a));
    }
}
