// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Persistence: the wire codec (§4.4) and the on-disk mmap forms it
//! backs (§4.4, §4.7) -- `SIMPLE`/`COMPOUND`/`SERIALIZED` files and the
//! splayed table directory layout.

mod mmap;
mod splay;
mod wire;

pub use mmap::{compound_key, map_compound, map_simple, read_serialized, write_compound, write_serialized, write_simple};
pub use splay::{read_table, write_table};
pub use wire::{de_raw, ser_raw, MsgType, WireHeader, MAGIC, WIRE_HEADER_SIZE};
