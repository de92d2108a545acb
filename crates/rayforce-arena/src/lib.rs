// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The buddy allocator arena each executor thread owns (§4.1), plus the
//! atomic-vs-plain refcounting mode toggle used during parallel sections
//! (§3.4, §5).

mod buddy;
mod refcount;

pub use buddy::{Arena, MAX_POOL_ORDER, MIN_ORDER, POOL_BYTES};
pub use refcount::{enter_parallel, is_parallel, leave_parallel};

use std::cell::RefCell;

thread_local! {
    // Mirrors the source's `__thread heap_p __HEAP`: every executor
    // thread (the reactor thread included) owns exactly one arena,
    // reached without threading it through every call site.
    static CURRENT: RefCell<Arena> = RefCell::new(Arena::new());
}

/// Runs `f` against the calling thread's arena.
pub fn with_arena<R>(f: impl FnOnce(&mut Arena) -> R) -> R {
    CURRENT.with(|cell| f(&mut cell.borrow_mut()))
}

/// Swaps the calling thread's arena for `arena`, returning the old one.
/// Used by the worker pool to install a prepared arena on an executor
/// thread before a parallel section and to retrieve it afterward for
/// `merge`.
pub fn replace_current(arena: Arena) -> Arena {
    CURRENT.with(|cell| cell.replace(arena))
}
