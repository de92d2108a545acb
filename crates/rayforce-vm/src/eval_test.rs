// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

use super::*;
use rayforce_core::SYMBOLS;
use rayforce_value::ListVec;

fn sym(name: &str) -> Value {
    Value::Symbol(SYMBOLS.intern(name))
}

fn list(items: Vec<Value>) -> Value {
    Value::List(ListVec::new(items))
}

#[test]
fn atoms_and_vectors_self_evaluate() {
    let mut ev = Evaluator::new(Environment::new());
    match ev.eval(&Value::I64(7)).unwrap() {
        Value::I64(7) => {}
        other => panic!("expected I64(7), got {other:?}"),
    }
}

#[test]
fn a_bound_symbol_resolves() {
    let mut env = Environment::new();
    let x = SYMBOLS.intern("eval-test-x");
    env.set(x, Value::I64(9));
    let mut ev = Evaluator::new(env);
    match ev.eval(&sym("eval-test-x")).unwrap() {
        Value::I64(9) => {}
        other => panic!("expected I64(9), got {other:?}"),
    }
}

#[test]
fn an_unbound_symbol_is_a_domain_error() {
    let mut ev = Evaluator::new(Environment::new());
    let err = ev.eval(&sym("eval-test-never-bound")).unwrap_err();
    assert_eq!(err.kind, rayforce_core::ErrorKind::Domain);
}

#[test]
fn a_builtin_call_dispatches_through_rayforce_kernels() {
    let mut ev = Evaluator::new(Environment::new());
    let term = list(vec![sym("add"), Value::I64(2), Value::I64(3)]);
    match ev.eval(&term).unwrap() {
        Value::I64(5) => {}
        other => panic!("expected I64(5), got {other:?}"),
    }
}

#[test]
fn cond_evaluates_only_the_taken_branch() {
    let mut ev = Evaluator::new(Environment::new());
    let boom = SYMBOLS.intern("eval-test-boom");
    let term = list(vec![sym("cond"), Value::B8(false), sym("eval-test-boom"), Value::I64(1)]);
    match ev.eval(&term).unwrap() {
        Value::I64(1) => {}
        other => panic!("expected I64(1), got {other:?}"),
    }
    // the untaken branch references an unbound symbol; if cond evaluated
    // it eagerly this would have errored instead of returning I64(1).
    assert!(SYMBOLS.resolve(boom).is_some());
}

#[test]
fn two_arm_cond_returns_null_when_falsy_with_no_else() {
    let mut ev = Evaluator::new(Environment::new());
    let term = list(vec![sym("cond"), Value::B8(false), Value::I64(1)]);
    match ev.eval(&term).unwrap() {
        Value::Null => {}
        other => panic!("expected Null, got {other:?}"),
    }
}

#[test]
fn and_short_circuits_on_the_first_falsy_value() {
    let mut ev = Evaluator::new(Environment::new());
    let term = list(vec![sym("and"), Value::B8(true), Value::B8(false), sym("eval-test-unreached")]);
    match ev.eval(&term).unwrap() {
        Value::B8(false) => {}
        other => panic!("expected B8(false), got {other:?}"),
    }
}

#[test]
fn or_short_circuits_on_the_first_truthy_value() {
    let mut ev = Evaluator::new(Environment::new());
    let term = list(vec![sym("or"), Value::B8(false), Value::I64(5), sym("eval-test-unreached")]);
    match ev.eval(&term).unwrap() {
        Value::I64(5) => {}
        other => panic!("expected I64(5), got {other:?}"),
    }
}

#[test]
fn set_binds_into_the_global_environment() {
    let mut ev = Evaluator::new(Environment::new());
    let term = list(vec![sym("set"), sym("eval-test-global"), Value::I64(11)]);
    ev.eval(&term).unwrap();
    match ev.global.get(SYMBOLS.intern("eval-test-global")) {
        Some(Value::I64(11)) => {}
        other => panic!("expected I64(11), got {other:?}"),
    }
}

#[test]
fn let_binds_locally_and_evaluates_the_body() {
    let mut ev = Evaluator::new(Environment::new());
    let bindings = list(vec![list(vec![sym("eval-test-n"), Value::I64(4)])]);
    let body = list(vec![sym("add"), sym("eval-test-n"), Value::I64(1)]);
    let term = list(vec![sym("let"), bindings, body]);
    match ev.eval(&term).unwrap() {
        Value::I64(5) => {}
        other => panic!("expected I64(5), got {other:?}"),
    }
    assert!(ev.global.get(SYMBOLS.intern("eval-test-n")).is_none());
}

#[test]
fn timer_validates_arguments_then_reports_not_implemented() {
    let mut ev = Evaluator::new(Environment::new());
    let callback = Value::Lambda(rayforce_value::Lambda::new(vec![], vec![], Value::Null, vec![]));
    let term = list(vec![sym("timer"), Value::I64(100), Value::I64(3), callback]);
    let err = ev.eval(&term).unwrap_err();
    assert_eq!(err.kind, rayforce_core::ErrorKind::NotImplemented);
}

#[test]
fn timer_rejects_a_non_lambda_callback() {
    let mut ev = Evaluator::new(Environment::new());
    let term = list(vec![sym("timer"), Value::I64(100), Value::I64(3), Value::I64(0)]);
    let err = ev.eval(&term).unwrap_err();
    assert_eq!(err.kind, rayforce_core::ErrorKind::Type);
}

#[test]
fn tail_recursive_countdown_does_not_overflow_the_rust_stack() {
    let mut env = Environment::new();
    let n = SYMBOLS.intern("eval-test-countdown-n");
    let self_name = SYMBOLS.intern("eval-test-countdown");
    // (cond n (countdown (sub n 1)) 0)
    // `n` itself is cond's test: nonzero is truthy (§ is_truthy), so this
    // recurses until n reaches 0. The recursive call sits in tail
    // position inside cond's taken branch, so `apply_lambda`'s
    // trampoline keeps Rust stack depth constant no matter how deep the
    // countdown runs.
    let body = list(vec![
        sym("cond"),
        sym("eval-test-countdown-n"),
        list(vec![sym("eval-test-countdown"), list(vec![sym("sub"), sym("eval-test-countdown-n"), Value::I64(1)])]),
        Value::I64(0),
    ]);
    let lambda = rayforce_value::Lambda::new(vec![n], vec![], body, vec![]);
    env.set(self_name, Value::Lambda(lambda));

    let mut ev = Evaluator::new(env);
    let lambda = match ev.global.get(self_name).unwrap().clone() {
        Value::Lambda(l) => l,
        _ => unreachable!(),
    };
    let result = ev.apply_lambda(&lambda, vec![Value::I64(200_000)]).unwrap();
    match result {
        Value::I64(0) => {}
        other => panic!("expected I64(0), got {other:?}"),
    }
}
