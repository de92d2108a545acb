// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! On-disk mmap forms (§4.4): `SIMPLE` (header at offset 0), `COMPOUND`
//! (`RAY_PAGE_SIZE` preamble carrying a printable key, used for ENUM
//! domain files), and `SERIALIZED` (a mode-only prefix followed by a
//! wire-encoded blob, for values that aren't directly mappable).

use crate::wire;
use memmap2::{Mmap, MmapOptions};
use rayforce_core::{ErrorKind, MemMode, ObjHeader, RayError, Tag, HEADER_SIZE, RAY_PAGE_SIZE};
use rayforce_value::{HeapBuffer, Value, Vector};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Maps a `SIMPLE` file directly as a vector: header at offset 0, then
/// the element payload, matching the in-memory layout exactly so no copy
/// is needed. The element tag is read back from the header rather than
/// supplied by the caller, same self-describing rule as the wire codec.
pub fn map_simple(path: &Path) -> Result<Vector, RayError> {
    let file = File::open(path).map_err(|e| RayError::io(path.display().to_string(), &e))?;
    // SAFETY: the mapped file is treated as read-only for the mapping's
    // lifetime; concurrent external truncation is the caller's problem,
    // same as for any other mmap-backed store.
    let mmap = unsafe { MmapOptions::new().map(&file) }.map_err(|e| RayError::io(path.display().to_string(), &e))?;
    check_header(&mmap, 0, MemMode::ExternalSimple)?;
    let tag = read_tag(&mmap, 0)?;
    Ok(Vector::from_buffer(tag, HeapBuffer::from_mmap(mmap, 0)))
}

/// Maps a `COMPOUND` file: a `RAY_PAGE_SIZE` preamble (a printable key,
/// used for ENUM domain files so the file is self-identifying), then the
/// header at that page offset.
pub fn map_compound(path: &Path) -> Result<Vector, RayError> {
    let file = File::open(path).map_err(|e| RayError::io(path.display().to_string(), &e))?;
    let mmap = unsafe { MmapOptions::new().map(&file) }.map_err(|e| RayError::io(path.display().to_string(), &e))?;
    check_header(&mmap, RAY_PAGE_SIZE, MemMode::ExternalCompound)?;
    let tag = read_tag(&mmap, RAY_PAGE_SIZE)?;
    Ok(Vector::from_buffer(tag, HeapBuffer::from_mmap(mmap, RAY_PAGE_SIZE)))
}

/// Reads the printable key out of a `COMPOUND` file's preamble, without
/// mapping the rest (used to find which `sym` file a symbol column
/// refers to before deciding whether it's already loaded).
pub fn compound_key(path: &Path) -> Result<String, RayError> {
    let mut bytes = vec![0u8; RAY_PAGE_SIZE];
    let mut file = File::open(path).map_err(|e| RayError::io(path.display().to_string(), &e))?;
    std::io::Read::read_exact(&mut file, &mut bytes).map_err(|e| RayError::io(path.display().to_string(), &e))?;
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8(bytes[..end].to_vec()).map_err(|_| RayError::new(ErrorKind::Parse, "compound preamble key is not valid UTF-8"))
}

/// Reads a `SERIALIZED` blob: a 16-byte mode-only prefix, then a
/// self-describing wire payload (§4.4), for values too irregular to map
/// directly (e.g. a `TABLE` or `ERROR`).
pub fn read_serialized(path: &Path) -> Result<Value, RayError> {
    let bytes = std::fs::read(path).map_err(|e| RayError::io(path.display().to_string(), &e))?;
    if bytes.len() < HEADER_SIZE {
        return Err(RayError::new(ErrorKind::Parse, "serialized blob shorter than its header"));
    }
    MemMode::from_u8(bytes[0])
        .filter(|m| *m == MemMode::ExternalSerialized)
        .ok_or_else(|| RayError::new(ErrorKind::Parse, "not a SERIALIZED blob"))?;
    let (value, _) = wire::de_raw(&bytes[HEADER_SIZE..])?;
    Ok(value)
}

/// Writes a value as a `SERIALIZED` blob: truncate, write, fsync (§4.7's
/// atomic-write rule applies to every on-disk form, not just splayed
/// columns).
pub fn write_serialized(path: &Path, value: &Value) -> Result<(), RayError> {
    let payload = wire::ser_raw(value)?;
    let mut header = [0u8; HEADER_SIZE];
    header[0] = MemMode::ExternalSerialized as u8;
    atomic_write(path, &[&header[..], &payload])
}

/// Writes a `SIMPLE` file for a scalar vector: header, then raw payload
/// bytes, matching the in-memory layout byte-for-byte.
pub fn write_simple(path: &Path, v: &Vector) -> Result<(), RayError> {
    let header = v_header(v, MemMode::ExternalSimple);
    atomic_write(path, &[header_bytes(&header).as_slice(), v_payload_bytes(v)])
}

/// Writes a `COMPOUND` file: a page-sized preamble carrying `key`
/// (zero-padded), then the header and payload.
pub fn write_compound(path: &Path, v: &Vector, key: &str) -> Result<(), RayError> {
    let mut preamble = vec![0u8; RAY_PAGE_SIZE];
    let key_bytes = key.as_bytes();
    preamble[..key_bytes.len().min(RAY_PAGE_SIZE)].copy_from_slice(&key_bytes[..key_bytes.len().min(RAY_PAGE_SIZE)]);
    let header = v_header(v, MemMode::ExternalCompound);
    atomic_write(path, &[&preamble, header_bytes(&header).as_slice(), v_payload_bytes(v)])
}

fn v_header(v: &Vector, mode: MemMode) -> ObjHeader {
    ObjHeader::new(mode, 0, v.tag() as i8, v.len() as u64)
}

fn header_bytes(h: &ObjHeader) -> [u8; HEADER_SIZE] {
    let mut out = [0u8; HEADER_SIZE];
    out[0] = h.mmod;
    out[1] = h.order;
    out[2] = h.type_tag as u8;
    out[3] = h.attrs.bits();
    out[4..8].copy_from_slice(&h.refc.to_le_bytes());
    out[8..16].copy_from_slice(&h.len.to_le_bytes());
    out
}

fn v_payload_bytes(v: &Vector) -> &[u8] {
    v.raw_payload()
}

fn read_tag(mmap: &Mmap, header_offset: usize) -> Result<Tag, RayError> {
    let raw = mmap[header_offset + 2] as i8;
    Tag::from_i8(raw).ok_or_else(|| RayError::new(ErrorKind::Parse, "unknown type tag byte in mapped header"))
}

fn check_header(mmap: &Mmap, offset: usize, expect: MemMode) -> Result<(), RayError> {
    if mmap.len() < offset + HEADER_SIZE {
        return Err(RayError::new(ErrorKind::Parse, "mapped file shorter than its header"));
    }
    let mmod = MemMode::from_u8(mmap[offset])
        .ok_or_else(|| RayError::new(ErrorKind::Parse, "unknown mmod byte in mapped header"))?;
    if mmod != expect {
        return Err(RayError::new(
            ErrorKind::Parse,
            format!("expected {expect:?} on-disk form, found {mmod:?}"),
        ));
    }
    Ok(())
}

/// Truncate + write + fsync, per §4.7's atomic per-file write rule.
fn atomic_write(path: &Path, parts: &[&[u8]]) -> Result<(), RayError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| RayError::io(path.display().to_string(), &e))?;
    for part in parts {
        file.write_all(part).map_err(|e| RayError::io(path.display().to_string(), &e))?;
    }
    file.sync_all().map_err(|e| RayError::io(path.display().to_string(), &e))?;
    Ok(())
}

#[cfg(test)]
mod mmap_test;
