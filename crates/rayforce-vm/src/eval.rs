// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The term walker (§4.9). `rayforce_value::Value` doubles as the AST:
//! every non-`List` variant self-evaluates, a `List` is an application
//! form whose head decides special-form / builtin / lambda dispatch.
//! There is no separate AST enum and no bytecode -- the (external)
//! parser hands the evaluator a `Value` tree directly and the evaluator
//! walks it.
//!
//! Tail-position lambda calls inside a `cond`/`and`/`or` branch or a
//! lambda body's final form run through a trampoline (`Step::Call`)
//! rather than recursing, bounding stack depth on the common
//! `(cond test (recur ...))` loop idiom (§4.9's "MAY be executed by
//! loop"). `let`'s body is evaluated recursively, not trampolined --
//! tail recursion through `let` would need per-`let` frame bookkeeping
//! the rest of this design doesn't otherwise require.

use crate::builtin::{self, Builtin};
use crate::environment::Environment;
use crate::special_form::SpecialForm;
use rayforce_core::{ErrorKind, RayError, SymbolId, SYMBOLS};
use rayforce_value::{Lambda, ListVec, Value};
use std::collections::HashMap;
use std::time::Instant;

/// Local-slot frame for one active lambda call: argument and local
/// names, indexed by symbol id (§4.9 item 3).
type Frame = HashMap<SymbolId, Value>;

/// The outcome of evaluating a term in tail position: either a plain
/// value, or an unapplied lambda call the trampoline in
/// [`Evaluator::apply_lambda`] should loop into instead of recursing.
enum Step {
    Value(Value),
    Call(Lambda, Vec<Value>),
}

/// Walks terms against a global [`Environment`] plus a stack of
/// per-call local-slot frames. Reentrant but not parallel (§4.9): one
/// `Evaluator` runs on the reactor thread, and each worker thread owns
/// its own instance over a cloned environment snapshot.
pub struct Evaluator {
    pub global: Environment,
    frames: Vec<Frame>,
    timeit: bool,
}

impl Evaluator {
    #[must_use]
    pub fn new(global: Environment) -> Self {
        Self {
            global,
            frames: Vec::new(),
            timeit: false,
        }
    }

    /// Enables wall-clock reporting around every call to [`Self::eval`]
    /// (the `-t`/`--timeit` CLI flag, supplemented from `core/repl.c`).
    /// Independent of the `timeit` special form, which times one
    /// expression regardless of this flag.
    pub fn set_timeit(&mut self, enabled: bool) {
        self.timeit = enabled;
    }

    /// Evaluates a top-level term (§4.9's READY → EVAL → READY/ERROR
    /// state machine, collapsed into a single call).
    pub fn eval(&mut self, term: &Value) -> Result<Value, RayError> {
        if self.timeit {
            let start = Instant::now();
            let result = self.value(term);
            tracing::info!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "timeit");
            result
        } else {
            self.value(term)
        }
    }

    /// Evaluates `term` to a concrete value, flattening any tail call
    /// the trampoline would otherwise propagate (never reachable in
    /// practice, since this only calls [`Self::step`] with `tail =
    /// false`, but resolved defensively rather than left unreachable).
    fn value(&mut self, term: &Value) -> Result<Value, RayError> {
        match self.step(term, false)? {
            Step::Value(v) => Ok(v),
            Step::Call(lambda, args) => self.apply_lambda(&lambda, args),
        }
    }

    fn step(&mut self, term: &Value, tail: bool) -> Result<Step, RayError> {
        match term {
            Value::Symbol(sym) => self.resolve(*sym).map(Step::Value),
            Value::List(list) => self.step_list(list.as_slice(), tail),
            other => Ok(Step::Value(other.clone())),
        }
    }

    fn step_list(&mut self, items: &[Value], tail: bool) -> Result<Step, RayError> {
        let Some(head) = items.first() else {
            return Ok(Step::Value(Value::List(ListVec::new(Vec::new()))));
        };
        let raw_args = &items[1..];

        if let Value::Symbol(sym) = head {
            if let Some(name) = SYMBOLS.resolve(*sym) {
                if let Some(form) = SpecialForm::lookup(&name) {
                    return self.special_form(form, raw_args, tail);
                }
                if !self.is_bound(*sym) {
                    if let Some(b) = Builtin::lookup(&name) {
                        let args = self.eval_args(raw_args)?;
                        return builtin::call(b, &args).map(Step::Value);
                    }
                }
            }
        }

        let callee = self.value(head)?;
        let args = self.eval_args(raw_args)?;
        match callee {
            Value::Lambda(l) if tail => Ok(Step::Call(l, args)),
            Value::Lambda(l) => self.apply_lambda(&l, args).map(Step::Value),
            other => Err(RayError::type_error(format!("{} is not callable", other.type_name()))),
        }
    }

    fn is_bound(&self, sym: SymbolId) -> bool {
        self.frames.last().is_some_and(|f| f.contains_key(&sym)) || self.global.contains(sym)
    }

    fn eval_args(&mut self, raw_args: &[Value]) -> Result<Vec<Value>, RayError> {
        raw_args.iter().map(|a| self.value(a)).collect()
    }

    fn resolve(&self, sym: SymbolId) -> Result<Value, RayError> {
        if let Some(frame) = self.frames.last() {
            if let Some(v) = frame.get(&sym) {
                return Ok(v.clone());
            }
        }
        if let Some(v) = self.global.get(sym) {
            return Ok(v.clone());
        }
        let name = SYMBOLS.resolve(sym).map_or_else(|| format!("<symbol {sym}>"), |s| s.to_string());
        Err(RayError::new(ErrorKind::Domain, format!("unbound symbol: {name}")))
    }

    fn bind_local(&mut self, name: SymbolId, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name, value);
        } else {
            self.global.set(name, value);
        }
    }

    /// Applies `lambda` to already-evaluated `args`, trampolining
    /// through tail-position self/mutual calls instead of recursing
    /// (§4.9's tail-call loop bound).
    pub fn apply_lambda(&mut self, lambda: &Lambda, args: Vec<Value>) -> Result<Value, RayError> {
        let mut lambda = lambda.clone();
        let mut args = args;
        loop {
            if args.len() != lambda.args().len() {
                return Err(RayError::arity_error(format!(
                    "lambda expects {} argument(s), got {}",
                    lambda.args().len(),
                    args.len()
                )));
            }
            let mut frame = Frame::new();
            for (&name, value) in lambda.args().iter().zip(args) {
                frame.insert(name, value);
            }
            for &local in lambda.locals() {
                frame.entry(local).or_insert(Value::Null);
            }
            self.frames.push(frame);
            let outcome = self.step(lambda.body(), true);
            self.frames.pop();
            match outcome {
                Err(e) => return Err(attach_nfo(e, &lambda)),
                Ok(Step::Value(v)) => return Ok(v),
                Ok(Step::Call(next_lambda, next_args)) => {
                    lambda = next_lambda;
                    args = next_args;
                }
            }
        }
    }

    fn special_form(&mut self, form: SpecialForm, raw_args: &[Value], tail: bool) -> Result<Step, RayError> {
        match form {
            SpecialForm::Cond => self.eval_cond(raw_args, tail),
            SpecialForm::And => self.eval_and_or(raw_args, tail, true),
            SpecialForm::Or => self.eval_and_or(raw_args, tail, false),
            SpecialForm::Set => self.eval_set(raw_args),
            SpecialForm::Let => self.eval_let(raw_args),
            SpecialForm::Timer => self.eval_timer(raw_args),
            SpecialForm::TimeIt => self.eval_timeit(raw_args),
        }
    }

    /// Grounded on `original_source/core/cond.c`'s `ray_cond`: 2 or 3
    /// raw arguments, evaluates only the branch it takes.
    fn eval_cond(&mut self, raw_args: &[Value], tail: bool) -> Result<Step, RayError> {
        match raw_args.len() {
            2 => {
                let test = self.value(&raw_args[0])?;
                if is_truthy(&test) {
                    self.step(&raw_args[1], tail)
                } else {
                    Ok(Step::Value(Value::Null))
                }
            }
            3 => {
                let test = self.value(&raw_args[0])?;
                if is_truthy(&test) {
                    self.step(&raw_args[1], tail)
                } else {
                    self.step(&raw_args[2], tail)
                }
            }
            n => Err(RayError::arity_error(format!("cond expects 2 or 3 arguments, got {n}"))),
        }
    }

    fn eval_and_or(&mut self, raw_args: &[Value], tail: bool, is_and: bool) -> Result<Step, RayError> {
        let Some((last, init)) = raw_args.split_last() else {
            return Ok(Step::Value(Value::B8(is_and)));
        };
        for expr in init {
            let value = self.value(expr)?;
            if is_truthy(&value) != is_and {
                return Ok(Step::Value(value));
            }
        }
        self.step(last, tail)
    }

    /// `(set name value)`: always binds in the global environment,
    /// regardless of the active call frame -- the counterpart to
    /// `let`'s local binding.
    fn eval_set(&mut self, raw_args: &[Value]) -> Result<Step, RayError> {
        let [Value::Symbol(name), expr] = raw_args else {
            return Err(RayError::arity_error("set expects 2 arguments: a symbol and a value expression"));
        };
        let value = self.value(expr)?;
        self.global.set(*name, value.clone());
        Ok(Step::Value(value))
    }

    /// `(let ((name expr) ...) body)`: binds each name in the current
    /// call frame (or the global environment at top level) before
    /// evaluating `body`. Bindings outlive the `let` form itself for
    /// the rest of the enclosing call, matching the single
    /// undifferentiated args+locals frame the rest of this evaluator
    /// uses for lambda calls.
    fn eval_let(&mut self, raw_args: &[Value]) -> Result<Step, RayError> {
        let [Value::List(bindings), body] = raw_args else {
            return Err(RayError::arity_error("let expects 2 arguments: a binding list and a body expression"));
        };
        for binding in bindings.as_slice() {
            let Value::List(pair) = binding else {
                return Err(RayError::type_error("each let binding must be a (name value) pair"));
            };
            let [Value::Symbol(name), expr] = pair.as_slice() else {
                return Err(RayError::type_error("each let binding must be a (name value) pair"));
            };
            let value = self.value(expr)?;
            self.bind_local(*name, value);
        }
        self.value(body).map(Step::Value)
    }

    /// Validates a `(timer period repeat-count callback)` form and
    /// reports it as unimplemented at this layer: actual scheduling
    /// happens on the reactor thread owned by `rayforce-runtime`, which
    /// this crate doesn't depend on. This is the seam the runtime's
    /// evaluator wiring replaces once it calls in.
    fn eval_timer(&mut self, raw_args: &[Value]) -> Result<Step, RayError> {
        let [period, repeat, callback] = raw_args else {
            return Err(RayError::arity_error(
                "timer expects 3 arguments: period, repeat count, and a callback lambda",
            ));
        };
        let period = self.value(period)?;
        let repeat = self.value(repeat)?;
        let callback = self.value(callback)?;
        if !matches!(period, Value::I64(_)) || !matches!(repeat, Value::I64(_)) || !matches!(callback, Value::Lambda(_)) {
            return Err(RayError::type_error("timer expects (period: i64, repeat-count: i64, callback: lambda)"));
        }
        Err(RayError::new(
            ErrorKind::NotImplemented,
            "timer registration requires a reactor; none is attached to this evaluator",
        ))
    }

    /// `(timeit expr)`: times one expression's evaluation regardless of
    /// the `--timeit` CLI flag (`core/repl.c`'s per-expression timer,
    /// supplemented per `SPEC_FULL.md`'s ambient-stack section).
    fn eval_timeit(&mut self, raw_args: &[Value]) -> Result<Step, RayError> {
        let [expr] = raw_args else {
            return Err(RayError::arity_error("timeit expects exactly 1 argument"));
        };
        let start = Instant::now();
        let result = self.value(expr);
        tracing::info!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "timeit");
        result.map(Step::Value)
    }
}

fn attach_nfo(err: RayError, lambda: &Lambda) -> RayError {
    if err.span.is_some() {
        return err;
    }
    match lambda.nfo() {
        Some(span) => err.with_span(span.filename.clone(), span.offset, span.length),
        None => err,
    }
}

/// `ops_as_b8`'s implied contract (`original_source/core/ops.h`):
/// truthy iff a non-zero, non-null atom. Containers and the error
/// value are always truthy; `Null` and numeric nulls are always false.
fn is_truthy(v: &Value) -> bool {
    match v {
        Value::B8(b) => *b,
        Value::U8(n) | Value::C8(n) => *n != 0,
        Value::I16(n) => *n != 0 && *n != i16::MIN,
        Value::I32(n) => *n != 0 && *n != i32::MIN,
        Value::I64(n) => *n != 0 && *n != i64::MIN,
        Value::F64(f) => *f != 0.0 && !f.is_nan(),
        Value::Date(n) | Value::Time(n) => *n != 0 && *n != i32::MIN,
        Value::Timestamp(n) => *n != 0 && *n != i64::MIN,
        Value::Symbol(id) => *id != rayforce_core::NULL_SYMBOL,
        Value::Null => false,
        _ => true,
    }
}

#[cfg(test)]
mod eval_test;

#[cfg(test)]
mod eval_proptest;
