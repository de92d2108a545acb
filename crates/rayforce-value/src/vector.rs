// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Typed vectors: arena-backed raw element storage for every scalar
//! type, plus the heterogeneous `List` (§3.1).

use crate::{HeapBuffer, Value};
use rayforce_core::{Guid, SymbolId, Tag};
use std::sync::Arc;

macro_rules! scalar_vector {
    ($name:ident, $elem:ty, $tag:expr) => {
        /// Builds a new vector of this element type, copying `items`
        /// into a fresh arena allocation.
        #[must_use]
        pub fn $name(items: &[$elem]) -> Option<Self> {
            let bytes = std::mem::size_of_val(items);
            let mut buf = HeapBuffer::alloc(bytes, $tag as i8)?;
            {
                let payload = buf.payload_mut();
                // SAFETY: `payload` has exactly `bytes` bytes reserved
                // for `items.len()` elements of `$elem`, and `$elem` is
                // one of the fixed-width scalar types this module
                // enumerates (no padding/alignment surprises for u8/i16/
                // i32/i64/f64 on any target we build for).
                unsafe {
                    std::ptr::copy_nonoverlapping(items.as_ptr().cast::<u8>(), payload.as_mut_ptr(), bytes);
                }
            }
            buf.set_header_len(items.len() as u64);
            Some(Self {
                tag: $tag,
                len: items.len(),
                buf: Arc::new(buf),
            })
        }
    };
}

/// A vector value: element tag, length, and the arena buffer backing its
/// elements (or, for `List`, the `Value` elements themselves).
#[derive(Clone)]
pub struct Vector {
    tag: Tag,
    len: usize,
    buf: Arc<HeapBuffer>,
}

/// `List`, the one vector kind that isn't a flat byte buffer: its
/// elements are themselves `Value`s, each independently refcounted, so
/// storage is a plain `Arc<[Value]>` rather than raw arena bytes.
#[derive(Clone)]
pub struct ListVec(pub Arc<[Value]>);

impl Vector {
    scalar_vector!(i64, i64, Tag::VecI64);
    scalar_vector!(i32, i32, Tag::VecI32);
    scalar_vector!(i16, i16, Tag::VecI16);
    scalar_vector!(u8, u8, Tag::VecU8);
    scalar_vector!(f64, f64, Tag::VecF64);
    scalar_vector!(date, i32, Tag::VecDate);
    scalar_vector!(time, i32, Tag::VecTime);
    scalar_vector!(timestamp, i64, Tag::VecTimestamp);
    scalar_vector!(symbol, SymbolId, Tag::VecSymbol);
    scalar_vector!(guid, Guid, Tag::VecGuid);

    #[must_use]
    pub fn bool(items: &[bool]) -> Option<Self> {
        let bytes: Vec<u8> = items.iter().map(|&b| u8::from(b)).collect();
        Self::u8_raw(&bytes, Tag::VecB8)
    }

    #[must_use]
    pub fn string(s: &str) -> Option<Self> {
        Self::u8_raw(s.as_bytes(), Tag::VecC8)
    }

    fn u8_raw(bytes: &[u8], tag: Tag) -> Option<Self> {
        let mut buf = HeapBuffer::alloc(bytes.len(), tag as i8)?;
        buf.payload_mut().copy_from_slice(bytes);
        buf.set_header_len(bytes.len() as u64);
        Some(Self {
            tag,
            len: bytes.len(),
            buf: Arc::new(buf),
        })
    }

    /// Wraps an externally-constructed buffer (a memory-mapped file, or a
    /// boxed byte run staged by the wire codec) as a vector of `tag`,
    /// trusting the buffer's own header `len` field rather than requiring
    /// the caller to track one (§4.4's on-disk mmap forms).
    #[must_use]
    pub fn from_buffer(tag: Tag, buf: HeapBuffer) -> Self {
        let len = buf.header().len as usize;
        Self {
            tag,
            len,
            buf: Arc::new(buf),
        }
    }

    #[must_use]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn typed_slice<T>(&self, expect: Tag) -> &[T] {
        assert_eq!(self.tag, expect, "vector element type mismatch");
        let payload = self.buf.payload();
        // SAFETY: the buffer was constructed by the scalar constructor
        // for `expect`, which lays out exactly `len` elements of `T`.
        unsafe { std::slice::from_raw_parts(payload.as_ptr().cast::<T>(), self.len) }
    }

    #[must_use]
    pub fn as_i64(&self) -> &[i64] {
        self.typed_slice(Tag::VecI64)
    }

    #[must_use]
    pub fn as_i32(&self) -> &[i32] {
        self.typed_slice(Tag::VecI32)
    }

    #[must_use]
    pub fn as_f64(&self) -> &[f64] {
        self.typed_slice(Tag::VecF64)
    }

    #[must_use]
    pub fn as_symbols(&self) -> &[SymbolId] {
        self.typed_slice(Tag::VecSymbol)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        assert_eq!(self.tag, Tag::VecC8, "not a string vector");
        std::str::from_utf8(self.buf.payload()).expect("C8 vector held non-UTF8 bytes")
    }

    #[must_use]
    pub fn as_bool(&self) -> Vec<bool> {
        self.typed_slice::<u8>(Tag::VecB8).iter().map(|&b| b != 0).collect()
    }

    /// Raw bytes backing a `VecU8` (also used as the blob half of a
    /// `MAPLIST`).
    #[must_use]
    pub(crate) fn typed_bytes(&self) -> &[u8] {
        self.typed_slice(Tag::VecU8)
    }

    /// The untyped payload bytes, whatever the element type -- used by
    /// the on-disk mmap writer, which stores the same bytes regardless of
    /// how they're later reinterpreted.
    #[must_use]
    pub fn raw_payload(&self) -> &[u8] {
        self.buf.payload()
    }

    /// Materializes the element at `i` as a standalone atom `Value`, for
    /// kernels that walk a vector one element at a time (§4.6).
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    #[must_use]
    pub fn element(&self, i: usize) -> Value {
        assert!(i < self.len, "vector index out of bounds");
        match self.tag {
            Tag::VecI64 => Value::I64(self.as_i64()[i]),
            Tag::VecI32 => Value::I32(self.as_i32()[i]),
            Tag::VecI16 => Value::I16(self.typed_slice::<i16>(Tag::VecI16)[i]),
            Tag::VecU8 => Value::U8(self.typed_bytes()[i]),
            Tag::VecB8 => Value::B8(self.typed_slice::<u8>(Tag::VecB8)[i] != 0),
            Tag::VecF64 => Value::F64(self.as_f64()[i]),
            Tag::VecDate => Value::Date(self.typed_slice::<i32>(Tag::VecDate)[i]),
            Tag::VecTime => Value::Time(self.typed_slice::<i32>(Tag::VecTime)[i]),
            Tag::VecTimestamp => Value::Timestamp(self.typed_slice::<i64>(Tag::VecTimestamp)[i]),
            Tag::VecSymbol => Value::Symbol(self.as_symbols()[i]),
            Tag::VecC8 => Value::C8(self.typed_bytes()[i]),
            Tag::VecGuid => Value::Guid(self.typed_slice::<rayforce_core::Guid>(Tag::VecGuid)[i]),
            other => unreachable!("{other:?} is not a scalar vector tag"),
        }
    }

    /// Builds a vector from atom values of a single, uniform tag. Returns
    /// `None` if `values` is empty (no tag to infer) or heterogeneous;
    /// callers fall back to a `List` in that case (§4.6's "downgrading to
    /// LIST if heterogeneity appears").
    #[must_use]
    pub fn from_values(values: &[Value]) -> Option<Self> {
        let first_tag = values.first()?.tag()?;
        if values.iter().any(|v| v.tag() != Some(first_tag)) {
            return None;
        }
        match first_tag {
            Tag::I64 => Self::i64(&values.iter().map(|v| as_i64(v)).collect::<Vec<_>>()),
            Tag::I32 => Self::i32(&values.iter().map(|v| as_i32(v)).collect::<Vec<_>>()),
            Tag::I16 => Self::i16(&values.iter().map(|v| as_i16(v)).collect::<Vec<_>>()),
            Tag::U8 => Self::u8(&values.iter().map(|v| as_u8(v)).collect::<Vec<_>>()),
            Tag::F64 => Self::f64(&values.iter().map(|v| as_f64(v)).collect::<Vec<_>>()),
            Tag::Date => Self::date(&values.iter().map(|v| as_i32(v)).collect::<Vec<_>>()),
            Tag::Time => Self::time(&values.iter().map(|v| as_i32(v)).collect::<Vec<_>>()),
            Tag::Timestamp => Self::timestamp(&values.iter().map(|v| as_i64(v)).collect::<Vec<_>>()),
            Tag::Symbol => Self::symbol(&values.iter().map(|v| as_symbol(v)).collect::<Vec<_>>()),
            Tag::Guid => Self::guid(&values.iter().map(|v| as_guid(v)).collect::<Vec<_>>()),
            Tag::B8 => Self::bool(&values.iter().map(|v| as_bool(v)).collect::<Vec<_>>()),
            Tag::C8 => None, // a run of C8 atoms has no natural vector home distinct from VecU8
            _ => None,       // non-atom tags never reach here: `tag()` on an atom Value is always one of the above
        }
    }
}

fn as_i64(v: &Value) -> i64 {
    match v {
        Value::I64(n) => *n,
        _ => unreachable!("from_values checked tag uniformity"),
    }
}
fn as_i32(v: &Value) -> i32 {
    match v {
        Value::I32(n) => *n,
        _ => unreachable!("from_values checked tag uniformity"),
    }
}
fn as_i16(v: &Value) -> i16 {
    match v {
        Value::I16(n) => *n,
        _ => unreachable!("from_values checked tag uniformity"),
    }
}
fn as_u8(v: &Value) -> u8 {
    match v {
        Value::U8(n) => *n,
        _ => unreachable!("from_values checked tag uniformity"),
    }
}
fn as_f64(v: &Value) -> f64 {
    match v {
        Value::F64(n) => *n,
        _ => unreachable!("from_values checked tag uniformity"),
    }
}
fn as_symbol(v: &Value) -> SymbolId {
    match v {
        Value::Symbol(n) => *n,
        _ => unreachable!("from_values checked tag uniformity"),
    }
}
fn as_guid(v: &Value) -> Guid {
    match v {
        Value::Guid(g) => *g,
        _ => unreachable!("from_values checked tag uniformity"),
    }
}
fn as_bool(v: &Value) -> bool {
    match v {
        Value::B8(b) => *b,
        _ => unreachable!("from_values checked tag uniformity"),
    }
}

impl ListVec {
    #[must_use]
    pub fn new(items: Vec<Value>) -> Self {
        Self(Arc::from(items))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}
