// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Per-object attribute bit flags, stored in the header's `attrs` byte.

/// Attribute bits carried in the object header: `DISTINCT`, `ASC`,
/// `DESC`, `QUOTED`, `PROTECTED`. Plain bitflags rather than a crate
/// dependency since the set is small and fixed.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct Attrs(u8);

impl Attrs {
    pub const DISTINCT: Self = Self(1 << 0);
    pub const ASC: Self = Self(1 << 1);
    pub const DESC: Self = Self(1 << 2);
    pub const QUOTED: Self = Self(1 << 3);
    pub const PROTECTED: Self = Self(1 << 4);

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl std::fmt::Debug for Attrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = Vec::new();
        for (flag, name) in [
            (Self::DISTINCT, "DISTINCT"),
            (Self::ASC, "ASC"),
            (Self::DESC, "DESC"),
            (Self::QUOTED, "QUOTED"),
            (Self::PROTECTED, "PROTECTED"),
        ] {
            if self.contains(flag) {
                names.push(name);
            }
        }
        write!(f, "Attrs({})", names.join("|"))
    }
}
