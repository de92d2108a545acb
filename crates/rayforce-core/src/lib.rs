// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Foundational types shared by every RayforceDB crate: type tags, the
//! 16-byte object header, GUIDs, null sentinels, the error taxonomy and
//! the global symbol interner.
//!
//! Nothing in this crate allocates on the [`rayforce_arena`] heap; it is
//! the vocabulary the rest of the workspace is built from.

mod attrs;
mod error;
mod guid;
mod header;
mod null;
mod prime;
mod symbol;
mod tag;

pub use attrs::Attrs;
pub use error::{ErrorKind, ErrorOrigin, RayError, SourceSpan};
pub use guid::Guid;
pub use header::{MemMode, ObjHeader, HEADER_SIZE};
pub use null::is_null_bits;
pub use prime::{is_prime, next_prime};
pub use symbol::{SymbolId, SymbolTable, NULL_SYMBOL, SYMBOLS};
pub use tag::Tag;

/// ns since the Unix epoch for RayforceDB's own epoch, 2000-01-01T00:00:00Z.
pub const EPOCH_OFFSET_SECS: i64 = 946_684_800;
/// Nanoseconds in one day, used to convert between `DATE` and `TIMESTAMP`.
pub const NANOS_FROM_DAY: i64 = 86_400 * 1_000_000_000;
/// Nanoseconds in one millisecond, used to convert between `TIME` and `TIMESTAMP`.
pub const NANOS_FROM_MILLIS: i64 = 1_000_000;

/// One committed page of the arena's reserved address space.
pub const RAY_PAGE_SIZE: usize = 4096;
