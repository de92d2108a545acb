// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The fixed set of SPECIAL_FORM heads (§4.9 item 4): `cond`, `timer`,
//! `set`, `let`, `and`, `or`, `timeit`. These bypass the evaluator's
//! ordinary left-to-right argument pre-evaluation; each handler decides
//! for itself which of its raw argument terms to evaluate, and in what
//! order. Grounded on `original_source/core/cond.c`'s `ray_cond`, which
//! evaluates only the branch it takes.

/// A recognized special form head. Resolved by name before the
/// evaluator falls back to an ordinary builtin or lambda lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialForm {
    Cond,
    Timer,
    Set,
    Let,
    And,
    Or,
    TimeIt,
}

impl SpecialForm {
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "cond" => Self::Cond,
            "timer" => Self::Timer,
            "set" => Self::Set,
            "let" => Self::Let,
            "and" => Self::And,
            "or" => Self::Or,
            "timeit" => Self::TimeIt,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod special_form_test;
