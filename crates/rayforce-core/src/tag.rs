// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The signed 8-bit type tag. Negative tags are atoms, positive tags are
//! vectors or compounds; see §3.1.

/// A value's type tag. `repr(i8)` so it round-trips through the on-disk
/// and wire header byte-for-byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Tag {
    // --- atoms (negative) ---
    Guid = -9,
    Symbol = -8,
    Timestamp = -7,
    Time = -6,
    Date = -5,
    F64 = -4,
    I64 = -3,
    I32 = -2,
    I16 = -1,
    // Tag 0 is reserved: a free arena block, never a live value.
    U8 = 1,
    B8 = 2,
    C8 = 3,
    // --- vectors (positive, scalar universe) ---
    VecI64 = 11,
    VecI32 = 12,
    VecI16 = 13,
    VecU8 = 14,
    VecB8 = 15,
    VecF64 = 16,
    VecDate = 17,
    VecTime = 18,
    VecTimestamp = 19,
    VecSymbol = 20,
    VecC8 = 21, // a string
    VecGuid = 22,
    List = 23,
    // --- compounds (positive) ---
    TableT = 30,
    DictT = 31,
    EnumT = 32,
    MapListT = 33,
    LambdaT = 34,
    ErrorT = 35,
}

impl Tag {
    /// Recovers a `Tag` from the raw byte stored in an `ObjHeader`'s
    /// `type_tag` field or a wire frame's leading tag byte. `None` for
    /// the reserved free-block tag `0` or any value outside the
    /// enumeration.
    #[must_use]
    pub const fn from_i8(v: i8) -> Option<Self> {
        Some(match v {
            -9 => Self::Guid,
            -8 => Self::Symbol,
            -7 => Self::Timestamp,
            -6 => Self::Time,
            -5 => Self::Date,
            -4 => Self::F64,
            -3 => Self::I64,
            -2 => Self::I32,
            -1 => Self::I16,
            1 => Self::U8,
            2 => Self::B8,
            3 => Self::C8,
            11 => Self::VecI64,
            12 => Self::VecI32,
            13 => Self::VecI16,
            14 => Self::VecU8,
            15 => Self::VecB8,
            16 => Self::VecF64,
            17 => Self::VecDate,
            18 => Self::VecTime,
            19 => Self::VecTimestamp,
            20 => Self::VecSymbol,
            21 => Self::VecC8,
            22 => Self::VecGuid,
            23 => Self::List,
            30 => Self::TableT,
            31 => Self::DictT,
            32 => Self::EnumT,
            33 => Self::MapListT,
            34 => Self::LambdaT,
            35 => Self::ErrorT,
            _ => return None,
        })
    }

    /// Negative tags are atoms; positive tags are vectors/compounds.
    #[must_use]
    pub const fn is_atom(self) -> bool {
        (self as i8) < 0
    }

    #[must_use]
    pub const fn is_vector(self) -> bool {
        matches!(
            self,
            Self::VecI64
                | Self::VecI32
                | Self::VecI16
                | Self::VecU8
                | Self::VecB8
                | Self::VecF64
                | Self::VecDate
                | Self::VecTime
                | Self::VecTimestamp
                | Self::VecSymbol
                | Self::VecC8
                | Self::VecGuid
                | Self::List
        )
    }

    #[must_use]
    pub const fn is_compound(self) -> bool {
        matches!(
            self,
            Self::TableT | Self::DictT | Self::EnumT | Self::MapListT | Self::LambdaT | Self::ErrorT
        )
    }

    #[must_use]
    pub const fn is_numeric_atom(self) -> bool {
        matches!(self, Self::I64 | Self::I32 | Self::I16 | Self::U8 | Self::B8 | Self::F64)
    }

    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Time | Self::Timestamp)
    }

    /// The vector tag built from atoms of this kind, e.g.
    /// `I64.vector_tag() == Some(VecI64)`. `None` for tags with no
    /// corresponding vector (compounds, vectors themselves).
    #[must_use]
    pub const fn vector_tag(self) -> Option<Self> {
        Some(match self {
            Self::I64 => Self::VecI64,
            Self::I32 => Self::VecI32,
            Self::I16 => Self::VecI16,
            Self::U8 => Self::VecU8,
            Self::B8 => Self::VecB8,
            Self::F64 => Self::VecF64,
            Self::Date => Self::VecDate,
            Self::Time => Self::VecTime,
            Self::Timestamp => Self::VecTimestamp,
            Self::Symbol => Self::VecSymbol,
            Self::C8 => Self::VecC8,
            Self::Guid => Self::VecGuid,
            _ => return None,
        })
    }

    /// Inverse of [`Self::vector_tag`]: the scalar element tag backing a
    /// vector tag.
    #[must_use]
    pub const fn element_tag(self) -> Option<Self> {
        Some(match self {
            Self::VecI64 => Self::I64,
            Self::VecI32 => Self::I32,
            Self::VecI16 => Self::I16,
            Self::VecU8 => Self::U8,
            Self::VecB8 => Self::B8,
            Self::VecF64 => Self::F64,
            Self::VecDate => Self::Date,
            Self::VecTime => Self::Time,
            Self::VecTimestamp => Self::Timestamp,
            Self::VecSymbol => Self::Symbol,
            Self::VecC8 => Self::C8,
            Self::VecGuid => Self::Guid,
            _ => return None,
        })
    }

    /// Fixed byte width of one element, for atoms and vector element
    /// storage. `None` for variable-width/compound tags.
    #[must_use]
    pub const fn element_size(self) -> Option<usize> {
        Some(match self {
            Self::B8 | Self::U8 | Self::C8 => 1,
            Self::I16 => 2,
            Self::I32 | Self::Date => 4,
            Self::Time => 4,
            Self::I64 | Self::F64 | Self::Timestamp | Self::Symbol => 8,
            Self::Guid => 16,
            Self::VecB8 | Self::VecU8 | Self::VecC8 => 1,
            Self::VecI16 => 2,
            Self::VecI32 | Self::VecDate | Self::VecTime => 4,
            Self::VecI64 | Self::VecF64 | Self::VecTimestamp | Self::VecSymbol => 8,
            Self::VecGuid => 16,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Guid => "guid",
            Self::Symbol => "symbol",
            Self::Timestamp => "timestamp",
            Self::Time => "time",
            Self::Date => "date",
            Self::F64 => "float",
            Self::I64 => "long",
            Self::I32 => "int",
            Self::I16 => "short",
            Self::U8 => "byte",
            Self::B8 => "bool",
            Self::C8 => "char",
            Self::VecI64 => "long-vector",
            Self::VecI32 => "int-vector",
            Self::VecI16 => "short-vector",
            Self::VecU8 => "byte-vector",
            Self::VecB8 => "bool-vector",
            Self::VecF64 => "float-vector",
            Self::VecDate => "date-vector",
            Self::VecTime => "time-vector",
            Self::VecTimestamp => "timestamp-vector",
            Self::VecSymbol => "symbol-vector",
            Self::VecC8 => "string",
            Self::VecGuid => "guid-vector",
            Self::List => "list",
            Self::TableT => "table",
            Self::DictT => "dict",
            Self::EnumT => "enum",
            Self::MapListT => "maplist",
            Self::LambdaT => "lambda",
            Self::ErrorT => "error",
        }
    }
}
