// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! RAII wrapper around one arena-allocated block (§4.3).
//!
//! `HeapBuffer` owns the raw bytes behind a vector's payload. Internal
//! buffers return their block to the calling thread's arena on drop;
//! external (mmapped) buffers release the mapping instead, per §3.4 and
//! Design Note "External mmapped values" — which is encoded here as a
//! variant of the ownership enum rather than re-reading the `mmod` byte
//! every drop.

use memmap2::Mmap;
use rayforce_core::HEADER_SIZE;

enum Owner {
    /// INTERNAL: bytes come from the calling thread's buddy arena.
    Internal,
    /// EXTERNAL_SIMPLE / EXTERNAL_COMPOUND: bytes are a memory-mapped
    /// file; `preamble` is the `RAY_PAGE_SIZE` offset added for
    /// COMPOUND mode so the header can still be found.
    Mapped { _mmap: Mmap, preamble: usize },
    /// A standalone allocation that bypassed the arena's freelist
    /// (oversized) or that was built purely in-process without ever
    /// asking the arena (e.g. staged wire-codec output); freed with the
    /// system allocator's `Box<[u8]>` drop glue.
    Boxed(Box<[u8]>),
}

/// Owns the bytes backing one heap object: a 16-byte [`rayforce_core::ObjHeader`]
/// followed by its element payload.
pub struct HeapBuffer {
    ptr: *mut u8,
    cap: usize,
    owner: Owner,
}

// SAFETY: `HeapBuffer` is moved between threads only via `Pool::prepare`'s
// `borrow`/`merge` dance, which happens while the lending thread is
// blocked on the pool barrier — there is never concurrent access.
unsafe impl Send for HeapBuffer {}

impl HeapBuffer {
    /// Allocates `payload_bytes` (plus the fixed header) from the
    /// calling thread's arena.
    #[must_use]
    pub fn alloc(payload_bytes: usize, type_tag: i8) -> Option<Self> {
        let ptr = rayforce_arena::with_arena(|arena| arena.alloc(payload_bytes, type_tag))?;
        Some(Self {
            ptr,
            cap: payload_bytes + HEADER_SIZE,
            owner: Owner::Internal,
        })
    }

    /// Wraps a plain heap (system-allocator) buffer, e.g. output staged
    /// by the wire codec before it becomes a real arena value.
    #[must_use]
    pub fn from_boxed(mut bytes: Box<[u8]>) -> Self {
        let ptr = bytes.as_mut_ptr();
        let cap = bytes.len();
        Self {
            ptr,
            cap,
            owner: Owner::Boxed(bytes),
        }
    }

    /// Wraps a memory-mapped file. `preamble` is 0 for `EXTERNAL_SIMPLE`
    /// and `RAY_PAGE_SIZE` for `EXTERNAL_COMPOUND`.
    #[must_use]
    pub fn from_mmap(mmap: Mmap, preamble: usize) -> Self {
        // SAFETY: `mmap`'s backing memory outlives `ptr`'s use because it
        // is moved into `owner` alongside it.
        let ptr = mmap.as_ptr().cast_mut();
        let cap = mmap.len();
        Self {
            ptr,
            cap,
            owner: Owner::Mapped { _mmap: mmap, preamble },
        }
    }

    #[must_use]
    pub fn header(&self) -> &rayforce_core::ObjHeader {
        let preamble = match &self.owner {
            Owner::Mapped { preamble, .. } => *preamble,
            _ => 0,
        };
        // SAFETY: every buffer begins (after any mmap preamble) with a
        // valid `ObjHeader` written at construction time.
        unsafe { &*self.ptr.add(preamble).cast::<rayforce_core::ObjHeader>() }
    }

    /// The element payload, immediately after the header.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        let preamble = match &self.owner {
            Owner::Mapped { preamble, .. } => *preamble,
            _ => 0,
        };
        let start = preamble + HEADER_SIZE;
        // SAFETY: `cap` bounds the buffer; `start <= cap` holds for every
        // object we construct (the header is always present).
        unsafe { std::slice::from_raw_parts(self.ptr.add(start), self.cap - start) }
    }

    /// Mutable view of the payload. Only valid for `Internal`/`Boxed`
    /// buffers — callers must not mutate a memory-mapped file backing a
    /// published table.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        assert!(
            !matches!(self.owner, Owner::Mapped { .. }),
            "attempted to mutate a memory-mapped heap buffer"
        );
        let start = HEADER_SIZE;
        // SAFETY: see `payload`; `Internal`/`Boxed` buffers are exclusively owned.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.add(start), self.cap - start) }
    }

    /// Patches the header's `len` field after copying the payload in.
    /// Only valid right after construction, before the buffer is shared
    /// behind an `Arc` — enforced by callers only invoking it from
    /// inside a vector/compound constructor, before wrapping `Arc::new`.
    pub(crate) fn set_header_len(&mut self, len: u64) {
        assert!(
            !matches!(self.owner, Owner::Mapped { .. }),
            "attempted to mutate a memory-mapped heap buffer's header"
        );
        // SAFETY: same header invariant as `Self::header`.
        unsafe {
            (*self.ptr.cast::<rayforce_core::ObjHeader>()).len = len;
        }
    }
}

impl Drop for HeapBuffer {
    fn drop(&mut self) {
        if matches!(self.owner, Owner::Internal) {
            rayforce_arena::with_arena(|arena| arena.free(self.ptr));
        }
        // `Boxed` and `Mapped` release themselves via their own field's
        // `Drop` impl once `owner` is dropped.
    }
}
