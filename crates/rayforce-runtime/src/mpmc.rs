// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! A bounded, lock-free MPMC ring (§4.10), transcribed from
//! `original_source/core/pool.c`'s `mpmc_create`/`mpmc_push`/`mpmc_pop`:
//! a power-of-two slot array where each cell carries its own Vyukov
//! sequence number, so producers and consumers make lock-free progress
//! under contention without a single shared head/tail lock.
//!
//! Reimplemented with `std::sync::atomic` rather than hand-rolled
//! `__atomic_*` builtins (Design Note 3, `spec.md` §9) -- the algorithm
//! is unchanged, only the primitives it's expressed in.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicU64, Ordering};

/// Returned by [`Mpmc::push`] when every slot is occupied (§9 Open
/// Question 2, hardened per `DESIGN.md`: callers must grow the ring or
/// propagate the failure, never drop the task silently).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueFull;

struct Cell<T> {
    seq: AtomicU64,
    data: UnsafeCell<MaybeUninit<T>>,
}

/// SAFETY: access to `data` is gated by the `seq` handshake below, which
/// gives exactly one producer and one consumer exclusive access to a
/// given cell's `data` at a time -- the same invariant a `Mutex<T>`
/// would provide, so `T: Send` is the only bound `Mpmc<T>` needs.
unsafe impl<T: Send> Sync for Mpmc<T> {}

/// A bounded MPMC queue. Capacity is rounded up to the next power of
/// two, matching `mpmc_create`'s `next_power_of_two_u64`.
pub struct Mpmc<T> {
    buf: Box<[Cell<T>]>,
    mask: u64,
    head: AtomicU64,
    tail: AtomicU64,
}

impl<T> Mpmc<T> {
    /// Builds a queue with capacity `>= size` (rounded to a power of two).
    #[must_use]
    pub fn new(size: usize) -> Self {
        let capacity = size.max(1).next_power_of_two();
        let buf: Box<[Cell<T>]> = (0..capacity)
            .map(|i| Cell {
                seq: AtomicU64::new(i as u64),
                data: UnsafeCell::new(MaybeUninit::uninit()),
            })
            .collect();
        Self {
            buf,
            mask: capacity as u64 - 1,
            head: AtomicU64::new(0),
            tail: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        (self.mask + 1) as usize
    }

    /// Approximate occupied-slot count (`mpmc_count`); may be stale
    /// under concurrent access, used only for queue-growth heuristics.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.tail.load(Ordering::Relaxed).wrapping_sub(self.head.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pushes `data`, failing with [`QueueFull`] rather than silently
    /// dropping it when every slot is occupied.
    pub fn push(&self, data: T) -> Result<(), QueueFull> {
        let mut pos = self.tail.load(Ordering::Relaxed);
        loop {
            let cell = &self.buf[(pos & self.mask) as usize];
            let seq = cell.seq.load(Ordering::Acquire);
            let dif = seq as i64 - pos as i64;
            match dif.cmp(&0) {
                std::cmp::Ordering::Equal => {
                    if self
                        .tail
                        .compare_exchange_weak(pos, pos + 1, Ordering::Relaxed, Ordering::Relaxed)
                        .is_ok()
                    {
                        // SAFETY: winning the CAS on `pos` gives this
                        // thread exclusive ownership of `cell` until it
                        // publishes the new `seq` below.
                        unsafe { (*cell.data.get()).write(data) };
                        cell.seq.store(pos + 1, Ordering::Release);
                        return Ok(());
                    }
                }
                std::cmp::Ordering::Less => return Err(QueueFull),
                std::cmp::Ordering::Greater => pos = self.tail.load(Ordering::Relaxed),
            }
        }
    }

    /// Pops the oldest pushed item, or `None` if the queue was observed
    /// empty.
    pub fn pop(&self) -> Option<T> {
        let mut pos = self.head.load(Ordering::Relaxed);
        loop {
            let cell = &self.buf[(pos & self.mask) as usize];
            let seq = cell.seq.load(Ordering::Acquire);
            let dif = seq as i64 - (pos as i64 + 1);
            match dif.cmp(&0) {
                std::cmp::Ordering::Equal => {
                    if self
                        .head
                        .compare_exchange_weak(pos, pos + 1, Ordering::Relaxed, Ordering::Relaxed)
                        .is_ok()
                    {
                        // SAFETY: winning the CAS on `pos` gives this
                        // thread exclusive ownership of `cell`'s data,
                        // which was published by the matching `push`'s
                        // `Release` store observed via the `Acquire`
                        // load above.
                        let data = unsafe { (*cell.data.get()).assume_init_read() };
                        cell.seq.store(pos + self.mask + 1, Ordering::Release);
                        return Some(data);
                    }
                }
                std::cmp::Ordering::Less => return None,
                std::cmp::Ordering::Greater => pos = self.head.load(Ordering::Relaxed),
            }
        }
    }
}

impl<T> Drop for Mpmc<T> {
    fn drop(&mut self) {
        // Drain whatever's left so `T`'s own `Drop` runs; cells beyond
        // the live range hold uninitialized `MaybeUninit` and must not
        // be read.
        while self.pop().is_some() {}
    }
}

#[cfg(test)]
mod mpmc_test;
