// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Standalone kernels that aren't part of the arithmetic dispatcher:
//! sort/rank/group and string matching.

pub mod sort;
pub mod string;
