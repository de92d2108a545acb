// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Per-type NULL sentinels: type-MIN for signed ints, NaN for `F64`.
//! See §3.1 and §4.5.

/// Checks the raw little-endian bit pattern of a fixed-width element
/// against its type's NULL sentinel. Used by the wire codec and kernels
/// that operate on untyped byte slices.
#[must_use]
pub fn is_null_bits(tag: crate::Tag, bits: &[u8]) -> bool {
    use crate::Tag;
    match tag {
        Tag::I16 => i16::from_le_bytes(bits.try_into().unwrap()) == i16::MIN,
        Tag::I32 | Tag::Date => i32::from_le_bytes(bits.try_into().unwrap()) == i32::MIN,
        Tag::Time => i32::from_le_bytes(bits.try_into().unwrap()) == i32::MIN,
        Tag::I64 | Tag::Timestamp => i64::from_le_bytes(bits.try_into().unwrap()) == i64::MIN,
        Tag::F64 => f64::from_le_bytes(bits.try_into().unwrap()).is_nan(),
        Tag::Symbol => i64::from_le_bytes(bits.try_into().unwrap()) == 0,
        // U8/B8/C8/Guid have no designated null sentinel.
        _ => false,
    }
}

/// NULL sentinel for each numeric/temporal scalar Rust type.
pub trait NullSentinel: Copy + PartialEq {
    const NULL: Self;
    fn is_null(self) -> bool;
}

macro_rules! impl_int_null {
    ($ty:ty) => {
        impl NullSentinel for $ty {
            const NULL: Self = <$ty>::MIN;
            fn is_null(self) -> bool {
                self == Self::NULL
            }
        }
    };
}

impl_int_null!(i16);
impl_int_null!(i32);
impl_int_null!(i64);

impl NullSentinel for f64 {
    const NULL: Self = f64::NAN;
    fn is_null(self) -> bool {
        self.is_nan()
    }
}
