// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Atomic-vs-plain refcounting mode toggle (§3.4, §5, Design Note 2).
//!
//! There are no cycles in the value graph, so a counting handle is
//! enough; the only wrinkle is that the counter must become atomic for
//! the duration of a worker-pool parallel section and may drop back to
//! a plain increment/decrement once the pool barrier returns. `Mode` is
//! a single process-wide flag the pool's `prepare`/`run` calls toggle;
//! [`rayforce_core::ObjHeader::incref`]/`decref` take it as a `bool`.

use std::sync::atomic::{AtomicBool, Ordering};

static PARALLEL: AtomicBool = AtomicBool::new(false);

/// Whether a parallel section (worker pool `run`) is currently active.
/// `ObjHeader::incref`/`decref` consult this to decide whether to use
/// atomic or plain increments.
#[must_use]
pub fn is_parallel() -> bool {
    PARALLEL.load(Ordering::Acquire)
}

/// Enters a parallel section: every subsequent refcount touch across all
/// arenas goes through the atomic path until [`leave_parallel`] is
/// called. Called once by `Pool::prepare`.
pub fn enter_parallel() {
    PARALLEL.store(true, Ordering::Release);
}

/// Leaves a parallel section. Called once by `Pool::run` after the
/// done-count barrier and arena merge complete.
pub fn leave_parallel() {
    PARALLEL.store(false, Ordering::Release);
}

#[cfg(test)]
mod refcount_test {
    use super::*;

    // A single test: the flag is process-global, so exercising enter/leave
    // in more than one `#[test]` would race against cargo's default
    // parallel test runner.
    #[test]
    fn toggles() {
        leave_parallel();
        assert!(!is_parallel());
        enter_parallel();
        assert!(is_parallel());
        leave_parallel();
        assert!(!is_parallel());
    }
}
