// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The 16-byte object header shared by every heap-resident value; see
//! §3.2. Must stay exactly 16 bytes so an externally mapped file can be
//! reinterpreted as an object in place.

use crate::attrs::Attrs;
use std::sync::atomic::{AtomicU32, Ordering};

/// Fixed size in bytes of [`ObjHeader`]; a `CASSERT`-style invariant
/// checked by the const assertion below rather than at runtime.
pub const HEADER_SIZE: usize = 16;

/// Memory mode: where the object's payload physically lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MemMode {
    /// Lives in the current executor's buddy arena.
    Internal = 0,
    /// A file mapped in place; header begins at file offset 0.
    ExternalSimple = 1,
    /// Preceded by a `RAY_PAGE_SIZE` preamble holding a printable key.
    ExternalCompound = 2,
    /// The 16-byte prefix carries only the mode; payload is wire-encoded.
    ExternalSerialized = 3,
}

impl MemMode {
    #[must_use]
    pub const fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0 => Self::Internal,
            1 => Self::ExternalSimple,
            2 => Self::ExternalCompound,
            3 => Self::ExternalSerialized,
            _ => return None,
        })
    }
}

/// The 16-byte prefix every heap object carries. `refc` is a plain `u32`
/// in storage; callers pick atomic or relaxed access via
/// [`ObjHeader::refc_atomic`] depending on whether a parallel section is
/// active (see `rayforce_arena::RefCount`).
#[repr(C)]
#[derive(Debug)]
pub struct ObjHeader {
    pub mmod: u8,
    pub order: u8,
    pub type_tag: i8,
    pub attrs: Attrs,
    pub refc: u32,
    pub len: u64,
}

const _: () = assert!(std::mem::size_of::<ObjHeader>() == HEADER_SIZE);

impl ObjHeader {
    #[must_use]
    pub const fn new(mmod: MemMode, order: u8, type_tag: i8, len: u64) -> Self {
        Self {
            mmod: mmod as u8,
            order,
            type_tag,
            attrs: Attrs::empty(),
            refc: 1,
            len,
        }
    }

    #[must_use]
    pub fn mem_mode(&self) -> MemMode {
        MemMode::from_u8(self.mmod).expect("header written with unknown mmod byte")
    }

    /// Reinterpret the `refc` field as an atomic for the duration of a
    /// parallel section. Safe because `ObjHeader` never moves while
    /// shared (it is always accessed through an arena-owned pointer).
    pub fn refc_atomic(&self) -> &AtomicU32 {
        let ptr = std::ptr::addr_of!(self.refc).cast::<AtomicU32>();
        // SAFETY: `AtomicU32` and `u32` share layout, and the field is
        // 4-byte aligned inside the `repr(C)` header.
        unsafe { &*ptr }
    }

    pub fn incref(&self, atomic: bool) -> u32 {
        if atomic {
            self.refc_atomic().fetch_add(1, Ordering::AcqRel) + 1
        } else {
            let ptr = std::ptr::addr_of!(self.refc).cast_mut();
            // SAFETY: caller guarantees no concurrent access when `atomic` is false.
            unsafe {
                *ptr += 1;
                *ptr
            }
        }
    }

    /// Decrements and returns the new count. Callers free the object when
    /// this reaches zero.
    pub fn decref(&self, atomic: bool) -> u32 {
        if atomic {
            self.refc_atomic().fetch_sub(1, Ordering::AcqRel) - 1
        } else {
            let ptr = std::ptr::addr_of!(self.refc).cast_mut();
            // SAFETY: caller guarantees no concurrent access when `atomic` is false.
            unsafe {
                *ptr -= 1;
                *ptr
            }
        }
    }
}
