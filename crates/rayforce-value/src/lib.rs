// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The tagged value model (§3): atoms, vectors, and compounds, built on
//! top of [`rayforce_arena`]'s per-thread buddy arena.
//!
//! Shared ownership follows Design Note 2: the value graph is a DAG (no
//! cycles), so a reference-counted handle is enough, and the
//! atomic-vs-plain toggle becomes a choice the source makes by hand per
//! `ObjHeader.refc` becomes, in Rust, simply `Arc`'s own atomic strong
//! count — we don't hand-roll a second counter next to one the standard
//! library already gives us for free. The arena-allocated raw bytes
//! backing each vector/compound are owned by [`heap::HeapBuffer`], whose
//! `Drop` impl returns the block to the arena; `Value` variants hold
//! `Arc<HeapBuffer>` so cloning a value is exactly one atomic increment.

mod compound;
mod heap;
mod value;
mod vector;

pub use compound::{Dict, Enum, ErrorValue, Lambda, MapList, Table};
pub use heap::HeapBuffer;
pub use value::Value;
pub use vector::{ListVec, Vector};
