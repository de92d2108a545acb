// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Wires `RAYFORCE_LOG_LEVEL` (§6.4) onto [`tracing_subscriber::EnvFilter`],
//! matching `core/log.c`'s level taxonomy (OFF/ERROR/WARN/INFO/DEBUG/TRACE).
//! Unset disables all logging, matching the original's default.

use tracing_subscriber::EnvFilter;

const LEVELS: [&str; 6] = ["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"];

/// Parses `[LEVEL][file1,file2,...]` into an `EnvFilter` directive string.
/// The per-file list narrows logging to those compilation units in the
/// original; `tracing`'s targets are module paths rather than filenames, so
/// here the named files are applied as directives at the requested level
/// and everything else stays at the blanket level (a documented
/// simplification -- the original greps by translation-unit filename,
/// which has no direct `tracing` equivalent).
fn parse(raw: &str) -> String {
    let (level_part, rest) = match raw.find('[') {
        Some(idx) => (&raw[..idx], &raw[idx..]),
        None => (raw, ""),
    };
    let level = LEVELS.iter().find(|l| l.eq_ignore_ascii_case(level_part)).copied().unwrap_or("OFF");
    if level == "OFF" {
        return "off".to_string();
    }
    let files: Vec<&str> = rest.trim_start_matches('[').trim_end_matches(']').split(',').filter(|s| !s.is_empty()).collect();
    if files.is_empty() {
        return level.to_lowercase();
    }
    let mut directive = level.to_lowercase();
    for file in files {
        directive.push_str(&format!(",{file}={}", level.to_lowercase()));
    }
    directive
}

pub fn init() {
    let Ok(raw) = std::env::var("RAYFORCE_LOG_LEVEL") else {
        return;
    };
    let directive = parse(&raw);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

#[cfg(test)]
mod logging_test {
    use super::parse;

    #[test]
    fn unset_level_word_disables_logging() {
        assert_eq!(parse("nonsense"), "off");
    }

    #[test]
    fn bare_level_lowercases_into_a_directive() {
        assert_eq!(parse("DEBUG"), "debug");
    }

    #[test]
    fn level_with_file_list_adds_per_file_directives() {
        assert_eq!(parse("WARN[pool.rs,reactor.rs]"), "warn,pool.rs=warn,reactor.rs=warn");
    }

    #[test]
    fn off_short_circuits_regardless_of_file_list() {
        assert_eq!(parse("OFF[pool.rs]"), "off");
    }
}
