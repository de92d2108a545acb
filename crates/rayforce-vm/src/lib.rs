// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The evaluator (§4.8, §4.9): a global [`Environment`] of variable and
//! type-name bindings, the fixed `SPECIAL_FORM` name set, the builtin
//! dispatch table routing into [`rayforce_kernels`], and the term
//! walker itself.

mod builtin;
mod environment;
mod eval;
mod special_form;

pub use builtin::Builtin;
pub use environment::Environment;
pub use eval::Evaluator;
pub use special_form::SpecialForm;
