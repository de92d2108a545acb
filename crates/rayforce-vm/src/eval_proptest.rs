// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn i64_atoms_self_evaluate(n: i64) {
        let mut evaluator = Evaluator::new(Environment::new());
        let result = evaluator.eval(&Value::I64(n)).unwrap();
        prop_assert!(matches!(result, Value::I64(v) if v == n));
    }

    #[test]
    fn f64_atoms_self_evaluate(n: f64) {
        let mut evaluator = Evaluator::new(Environment::new());
        let result = evaluator.eval(&Value::F64(n)).unwrap();
        match result {
            Value::F64(v) => prop_assert!(v.to_bits() == n.to_bits() || (v.is_nan() && n.is_nan())),
            other => prop_assert!(false, "expected F64, got {other:?}"),
        }
    }
}
