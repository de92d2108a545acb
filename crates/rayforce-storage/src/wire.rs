// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The self-describing wire codec (§4.4): a 16-byte `header_t` followed by
//! a recursive `tag(u8) + body` payload. Used both for the IPC frame body
//! and for `SERIALIZED`-mode blobs that aren't directly mmap-able.

use rayforce_core::{ErrorKind, RayError, Tag};
use rayforce_value::{Dict, ErrorValue, ListVec, Table, Value, Vector};

/// Marker value for [`WireHeader::magic`] (`SERDE_PREFIX` in the original).
pub const MAGIC: u32 = 0xCEFA_DEFA;

/// IPC/frame message kind (§4.12 item 3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MsgType {
    Async = 0,
    Sync = 1,
    Response = 2,
}

impl MsgType {
    #[must_use]
    pub const fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0 => Self::Async,
            1 => Self::Sync,
            2 => Self::Response,
            _ => return None,
        })
    }
}

/// The 16-byte frame/blob header (§4.4).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WireHeader {
    pub magic: u32,
    pub version: u8,
    pub flags: u8,
    pub endian: u8,
    pub msgtype: u8,
    pub payload_len: u64,
}

pub const WIRE_HEADER_SIZE: usize = 16;

impl WireHeader {
    #[must_use]
    pub fn new(msgtype: MsgType, payload_len: u64) -> Self {
        Self {
            magic: MAGIC,
            version: 1,
            flags: 0,
            endian: 0, // little-endian; a peer advertising endian=1 would need a byte-swap pass we don't implement (single-arch deployment)
            msgtype: msgtype as u8,
            payload_len,
        }
    }

    #[must_use]
    pub fn to_bytes(self) -> [u8; WIRE_HEADER_SIZE] {
        let mut out = [0u8; WIRE_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.magic.to_le_bytes());
        out[4] = self.version;
        out[5] = self.flags;
        out[6] = self.endian;
        out[7] = self.msgtype;
        out[8..16].copy_from_slice(&self.payload_len.to_le_bytes());
        out
    }

    pub fn from_bytes(buf: &[u8]) -> Result<Self, RayError> {
        if buf.len() < WIRE_HEADER_SIZE {
            return Err(RayError::new(ErrorKind::Parse, "short wire header"));
        }
        let magic = u32::from_le_bytes(buf[0..4].try_into().expect("checked length"));
        if magic != MAGIC {
            return Err(RayError::new(ErrorKind::Parse, "bad wire header magic"));
        }
        Ok(Self {
            magic,
            version: buf[4],
            flags: buf[5],
            endian: buf[6],
            msgtype: buf[7],
            payload_len: u64::from_le_bytes(buf[8..16].try_into().expect("checked length")),
        })
    }
}

/// Serializes a value's payload (tag + body), without a `WireHeader`.
pub fn ser_raw(value: &Value) -> Result<Vec<u8>, RayError> {
    let mut out = Vec::new();
    ser_into(value, &mut out)?;
    Ok(out)
}

/// Deserializes one payload from the front of `buf`, returning the value
/// and the number of bytes consumed.
pub fn de_raw(buf: &[u8]) -> Result<(Value, usize), RayError> {
    let mut cur = Cursor { buf, pos: 0 };
    let value = de_one(&mut cur)?;
    Ok((value, cur.pos))
}

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], RayError> {
        if self.pos + n > self.buf.len() {
            return Err(RayError::new(ErrorKind::Parse, "truncated wire payload"));
        }
        let s = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(s)
    }

    fn u8(&mut self) -> Result<u8, RayError> {
        Ok(self.take(1)?[0])
    }

    fn i8(&mut self) -> Result<i8, RayError> {
        Ok(self.u8()? as i8)
    }

    fn u32(&mut self) -> Result<u32, RayError> {
        Ok(u32::from_le_bytes(self.take(4)?.try_into().expect("checked length")))
    }

    fn cstr(&mut self) -> Result<String, RayError> {
        let start = self.pos;
        loop {
            if self.pos >= self.buf.len() {
                return Err(RayError::new(ErrorKind::Parse, "unterminated wire string"));
            }
            if self.buf[self.pos] == 0 {
                let s = String::from_utf8(self.buf[start..self.pos].to_vec())
                    .map_err(|_| RayError::new(ErrorKind::Parse, "non-UTF8 wire string"))?;
                self.pos += 1;
                return Ok(s);
            }
            self.pos += 1;
        }
    }
}

fn write_cstr(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(s.as_bytes());
    out.push(0);
}

fn ser_into(value: &Value, out: &mut Vec<u8>) -> Result<(), RayError> {
    match value {
        Value::I64(n) => {
            out.push(Tag::I64 as i8 as u8);
            out.extend_from_slice(&n.to_le_bytes());
        }
        Value::I32(n) => {
            out.push(Tag::I32 as i8 as u8);
            out.extend_from_slice(&n.to_le_bytes());
        }
        Value::I16(n) => {
            out.push(Tag::I16 as i8 as u8);
            out.extend_from_slice(&n.to_le_bytes());
        }
        Value::U8(n) => {
            out.push(Tag::U8 as i8 as u8);
            out.push(*n);
        }
        Value::B8(b) => {
            out.push(Tag::B8 as i8 as u8);
            out.push(u8::from(*b));
        }
        Value::C8(c) => {
            out.push(Tag::C8 as i8 as u8);
            out.push(*c);
        }
        Value::F64(f) => {
            out.push(Tag::F64 as i8 as u8);
            out.extend_from_slice(&f.to_le_bytes());
        }
        Value::Date(n) => {
            out.push(Tag::Date as i8 as u8);
            out.extend_from_slice(&n.to_le_bytes());
        }
        Value::Time(n) => {
            out.push(Tag::Time as i8 as u8);
            out.extend_from_slice(&n.to_le_bytes());
        }
        Value::Timestamp(n) => {
            out.push(Tag::Timestamp as i8 as u8);
            out.extend_from_slice(&n.to_le_bytes());
        }
        Value::Guid(g) => {
            out.push(Tag::Guid as i8 as u8);
            out.extend_from_slice(&g.0);
        }
        Value::Symbol(id) => {
            out.push(Tag::Symbol as i8 as u8);
            let s = rayforce_core::SYMBOLS.resolve(*id).unwrap_or_default();
            write_cstr(out, &s);
        }
        Value::Vector(v) => ser_vector(v, out)?,
        Value::List(l) => {
            out.push(Tag::List as i8 as u8);
            out.push(0); // attrs
            out.extend_from_slice(&(l.as_slice().len() as u32).to_le_bytes());
            for item in l.as_slice() {
                ser_into(item, out)?;
            }
        }
        Value::Table(t) => {
            out.push(Tag::TableT as i8 as u8);
            ser_into(&Value::Vector(t.names().clone()), out)?;
            ser_into(&Value::List(ListVec::new(t.columns().to_vec())), out)?;
        }
        Value::Dict(d) => {
            out.push(Tag::DictT as i8 as u8);
            ser_into(&Value::Vector(d.keys().clone()), out)?;
            ser_into(&Value::List(ListVec::new(d.values().to_vec())), out)?;
        }
        Value::Error(e) => {
            out.push(Tag::ErrorT as i8 as u8);
            out.push(e.inner().kind as u8);
            write_cstr(out, &e.inner().message);
        }
        Value::Enum(_) | Value::MapList(_) | Value::Lambda(_) => {
            return Err(RayError::new(
                ErrorKind::NotSupported,
                format!("{} has no wire representation; resolve it before sending", value.type_name()),
            ))
        }
        Value::Null => {
            out.push(0); // tag 0: reserved, here doubling as the wire NULL_OBJ marker
        }
    }
    Ok(())
}

fn ser_vector(v: &Vector, out: &mut Vec<u8>) -> Result<(), RayError> {
    out.push(v.tag() as i8 as u8);
    if v.tag() == Tag::VecSymbol {
        out.push(0); // attrs
        out.extend_from_slice(&(v.len() as u32).to_le_bytes());
        for &id in v.as_symbols() {
            let s = rayforce_core::SYMBOLS.resolve(id).unwrap_or_default();
            write_cstr(out, &s);
        }
        return Ok(());
    }
    out.push(0); // attrs
    out.extend_from_slice(&(v.len() as u32).to_le_bytes());
    match v.tag() {
        Tag::VecC8 => out.extend_from_slice(v.as_str().as_bytes()),
        Tag::VecI64 => v.as_i64().iter().for_each(|n| out.extend_from_slice(&n.to_le_bytes())),
        Tag::VecI32 => v.as_i32().iter().for_each(|n| out.extend_from_slice(&n.to_le_bytes())),
        Tag::VecF64 => v.as_f64().iter().for_each(|f| out.extend_from_slice(&f.to_le_bytes())),
        Tag::VecB8 => v.as_bool().iter().for_each(|&b| out.push(u8::from(b))),
        other => {
            return Err(RayError::new(
                ErrorKind::NotImplemented,
                format!("wire serialization of {} is not implemented", other.name()),
            ))
        }
    }
    Ok(())
}

fn de_one(cur: &mut Cursor<'_>) -> Result<Value, RayError> {
    let tag = cur.i8()?;
    match tag {
        0 => Ok(Value::Null),
        t if t == Tag::I64 as i8 => Ok(Value::I64(i64::from_le_bytes(cur.take(8)?.try_into().expect("checked")))),
        t if t == Tag::I32 as i8 => Ok(Value::I32(i32::from_le_bytes(cur.take(4)?.try_into().expect("checked")))),
        t if t == Tag::I16 as i8 => Ok(Value::I16(i16::from_le_bytes(cur.take(2)?.try_into().expect("checked")))),
        t if t == Tag::U8 as i8 => Ok(Value::U8(cur.u8()?)),
        t if t == Tag::B8 as i8 => Ok(Value::B8(cur.u8()? != 0)),
        t if t == Tag::C8 as i8 => Ok(Value::C8(cur.u8()?)),
        t if t == Tag::F64 as i8 => Ok(Value::F64(f64::from_le_bytes(cur.take(8)?.try_into().expect("checked")))),
        t if t == Tag::Date as i8 => Ok(Value::Date(i32::from_le_bytes(cur.take(4)?.try_into().expect("checked")))),
        t if t == Tag::Time as i8 => Ok(Value::Time(i32::from_le_bytes(cur.take(4)?.try_into().expect("checked")))),
        t if t == Tag::Timestamp as i8 => {
            Ok(Value::Timestamp(i64::from_le_bytes(cur.take(8)?.try_into().expect("checked"))))
        }
        t if t == Tag::Guid as i8 => {
            let bytes: [u8; 16] = cur.take(16)?.try_into().expect("checked");
            Ok(Value::Guid(rayforce_core::Guid(bytes)))
        }
        t if t == Tag::Symbol as i8 => {
            let s = cur.cstr()?;
            Ok(Value::Symbol(rayforce_core::SYMBOLS.intern(&s)))
        }
        t if t == Tag::VecSymbol as i8 => {
            let _attrs = cur.u8()?;
            let len = cur.u32()? as usize;
            let ids: Vec<_> = (0..len).map(|_| cur.cstr().map(|s| rayforce_core::SYMBOLS.intern(&s))).collect::<Result<_, _>>()?;
            Ok(Value::Vector(Vector::symbol(&ids).ok_or_else(RayError::memory)?))
        }
        t if t == Tag::VecC8 as i8 => {
            let _attrs = cur.u8()?;
            let len = cur.u32()? as usize;
            let bytes = cur.take(len)?;
            let s = std::str::from_utf8(bytes).map_err(|_| RayError::new(ErrorKind::Parse, "non-UTF8 string vector"))?;
            Ok(Value::Vector(Vector::string(s).ok_or_else(RayError::memory)?))
        }
        t if t == Tag::VecI64 as i8 => {
            let _attrs = cur.u8()?;
            let len = cur.u32()? as usize;
            let items: Vec<i64> = (0..len)
                .map(|_| cur.take(8).map(|b| i64::from_le_bytes(b.try_into().expect("checked"))))
                .collect::<Result<_, _>>()?;
            Ok(Value::Vector(Vector::i64(&items).ok_or_else(RayError::memory)?))
        }
        t if t == Tag::VecI32 as i8 => {
            let _attrs = cur.u8()?;
            let len = cur.u32()? as usize;
            let items: Vec<i32> = (0..len)
                .map(|_| cur.take(4).map(|b| i32::from_le_bytes(b.try_into().expect("checked"))))
                .collect::<Result<_, _>>()?;
            Ok(Value::Vector(Vector::i32(&items).ok_or_else(RayError::memory)?))
        }
        t if t == Tag::VecF64 as i8 => {
            let _attrs = cur.u8()?;
            let len = cur.u32()? as usize;
            let items: Vec<f64> = (0..len)
                .map(|_| cur.take(8).map(|b| f64::from_le_bytes(b.try_into().expect("checked"))))
                .collect::<Result<_, _>>()?;
            Ok(Value::Vector(Vector::f64(&items).ok_or_else(RayError::memory)?))
        }
        t if t == Tag::VecB8 as i8 => {
            let _attrs = cur.u8()?;
            let len = cur.u32()? as usize;
            let items: Vec<bool> = cur.take(len)?.iter().map(|&b| b != 0).collect();
            Ok(Value::Vector(Vector::bool(&items).ok_or_else(RayError::memory)?))
        }
        t if t == Tag::List as i8 => {
            let _attrs = cur.u8()?;
            let len = cur.u32()? as usize;
            let items: Vec<Value> = (0..len).map(|_| de_one(cur)).collect::<Result<_, _>>()?;
            Ok(Value::List(ListVec::new(items)))
        }
        t if t == Tag::TableT as i8 => {
            let names = expect_vector(de_one(cur)?)?;
            let columns = expect_list(de_one(cur)?)?;
            Ok(Value::Table(Table::new(names, columns)?))
        }
        t if t == Tag::DictT as i8 => {
            let keys = expect_vector(de_one(cur)?)?;
            let values = expect_list(de_one(cur)?)?;
            Ok(Value::Dict(Dict::new(keys, values)?))
        }
        t if t == Tag::ErrorT as i8 => {
            let kind_byte = cur.u8()?;
            let kind = ErrorKind::from_u8(kind_byte).ok_or_else(|| RayError::new(ErrorKind::Parse, "unknown error kind on the wire"))?;
            let message = cur.cstr()?;
            Ok(Value::Error(ErrorValue::new(RayError::new(kind, message))))
        }
        other => Err(RayError::new(ErrorKind::Parse, format!("unknown wire tag {other}"))),
    }
}

fn expect_vector(v: Value) -> Result<Vector, RayError> {
    match v {
        Value::Vector(v) => Ok(v),
        other => Err(RayError::type_error(format!("expected a vector on the wire, got {}", other.type_name()))),
    }
}

fn expect_list(v: Value) -> Result<Vec<Value>, RayError> {
    match v {
        Value::List(l) => Ok(l.as_slice().to_vec()),
        other => Err(RayError::type_error(format!("expected a list on the wire, got {}", other.type_name()))),
    }
}

#[cfg(test)]
mod wire_test;
