// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! `ray_like` pattern matching (§9 Open Question 3, frozen in `DESIGN.md`:
//! byte-wise, not UTF-8-codepoint-wise). `*` matches any run of bytes, `?`
//! matches exactly one byte.

/// Glob-style match: `*` matches zero or more bytes, `?` matches exactly
/// one byte, any other byte must match literally. Operates on raw bytes,
/// so a multi-byte UTF-8 codepoint can be split across a `?` wildcard --
/// this is the preserved behavior, not an oversight.
#[must_use]
pub fn like(haystack: &[u8], pattern: &[u8]) -> bool {
    match_from(haystack, pattern)
}

fn match_from(s: &[u8], p: &[u8]) -> bool {
    match p.first() {
        None => s.is_empty(),
        Some(b'*') => {
            // `*` may match the empty run, so try every split point.
            match_from(s, &p[1..]) || (!s.is_empty() && match_from(&s[1..], p))
        }
        Some(b'?') => !s.is_empty() && match_from(&s[1..], &p[1..]),
        Some(&c) => !s.is_empty() && s[0] == c && match_from(&s[1..], &p[1..]),
    }
}

#[cfg(test)]
mod string_test;
