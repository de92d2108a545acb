// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The reactor's timer wheel (§4.13), transcribed from
//! `original_source/core/chrono.c`'s `timer_push`/`timer_pop`/`timer_up`/
//! `timer_down`/`timer_del`/`timer_next_timeout`: a binary min-heap over
//! an array, keyed by absolute expiry in milliseconds, with an O(n) scan
//! for cancellation rather than an index side-table (the original never
//! builds one either, since timers are rarely cancelled compared to how
//! often they fire).

use rayforce_value::Value;
use std::time::Duration;

/// `num`'s sentinel for "repeat forever" (§4.13: "num (remaining
/// repeats, -1 = infinite)").
pub const REPEAT_FOREVER: i64 = -1;

struct TimerEntry {
    id: u64,
    /// Period in milliseconds between firings.
    tic: i64,
    /// Absolute expiry, milliseconds since whatever epoch the caller's
    /// clock uses -- the heap only needs firings ordered relative to
    /// each other and to `now`.
    exp: i64,
    /// Remaining repeat count; 1 means this is the last firing, 0 means
    /// a one-shot that has already fired, [`REPEAT_FOREVER`] never
    /// decrements.
    num: i64,
    callback: Box<dyn FnMut(i64) -> Value + Send>,
}

/// A min-heap of timers plus the monotonic id counter that names them.
pub struct Timers {
    entries: Vec<TimerEntry>,
    next_id: u64,
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new(), next_id: 0 }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedules a timer firing `tic` milliseconds from `now`, repeating
    /// `num` more times (`REPEAT_FOREVER` for unbounded). Returns the id
    /// later passed to [`Timers::cancel`].
    pub fn add(&mut self, now: i64, tic: i64, num: i64, callback: impl FnMut(i64) -> Value + Send + 'static) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.push(TimerEntry { id, tic, exp: now + tic, num, callback: Box::new(callback) });
        id
    }

    /// Removes the timer named `id`, if still pending. O(n), matching
    /// `timer_del`'s linear scan.
    pub fn cancel(&mut self, id: u64) -> bool {
        let Some(idx) = self.entries.iter().position(|t| t.id == id) else {
            return false;
        };
        let last = self.entries.len() - 1;
        self.entries.swap(idx, last);
        self.entries.pop();
        if idx < self.entries.len() {
            self.sift_down(idx);
        }
        true
    }

    /// Fires every timer whose expiry is `<= now`, reinserting repeaters
    /// with `exp` advanced by `tic`, and returns how long the caller
    /// should block before the next firing is due (`None` means no
    /// timers are pending -- the reactor's `TIMEOUT_INFINITY`).
    pub fn fire_due(&mut self, now: i64) -> Option<Duration> {
        while let Some(top) = self.entries.first() {
            if top.exp > now {
                break;
            }
            let mut entry = self.pop().expect("peeked a non-empty heap");
            (entry.callback)(now);

            if entry.num == REPEAT_FOREVER {
                entry.exp += entry.tic;
                self.push(entry);
            } else if entry.num > 1 {
                entry.num -= 1;
                entry.exp += entry.tic;
                self.push(entry);
            }
            // num == 1 or 0: this was the timer's last occurrence.
        }
        self.entries.first().map(|t| Duration::from_millis((t.exp - now).max(0) as u64))
    }

    fn push(&mut self, entry: TimerEntry) {
        self.entries.push(entry);
        self.sift_up(self.entries.len() - 1);
    }

    fn pop(&mut self) -> Option<TimerEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let top = self.entries.pop();
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        top
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.entries[parent].exp <= self.entries[idx].exp {
                break;
            }
            self.entries.swap(parent, idx);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;
            if left < self.entries.len() && self.entries[left].exp < self.entries[smallest].exp {
                smallest = left;
            }
            if right < self.entries.len() && self.entries[right].exp < self.entries[smallest].exp {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.entries.swap(idx, smallest);
            idx = smallest;
        }
    }
}

#[cfg(test)]
mod timer_test;
