// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Turns a loaded file, or a line of REPL input, into the `Value` term the
//! evaluator consumes. The surface syntax parser is an external
//! collaborator (§1); the interface the core actually exposes is "bytes in
//! the wire-format encoding produce a `Value`" (§6, `rayforce_storage::de_raw`).
//! A script file is therefore read as raw `de_raw`-encoded bytes rather than
//! human-authored source text, and the interactive REPL accepts the same
//! encoding as a hex string per line -- the one textual rendering this
//! workspace actually defines.

use rayforce_core::{ErrorKind, RayError, SYMBOLS};
use rayforce_storage::de_raw;
use rayforce_value::{Dict, Value, Vector};
use std::path::Path;

pub fn load_script(path: &Path) -> Result<Value, RayError> {
    let bytes = std::fs::read(path).map_err(|e| RayError::io(path.display().to_string(), &e))?;
    let (value, _) = de_raw(&bytes)?;
    Ok(value)
}

/// Decodes one line of hex-encoded wire bytes into a `Value` term.
pub fn decode_line(line: &str) -> Result<Value, RayError> {
    let bytes = decode_hex(line.trim())?;
    let (value, _) = de_raw(&bytes)?;
    Ok(value)
}

fn decode_hex(s: &str) -> Result<Vec<u8>, RayError> {
    if s.len() % 2 != 0 {
        return Err(RayError::new(ErrorKind::Parse, "odd-length hex input"));
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| RayError::new(ErrorKind::Parse, "invalid hex digit")))
        .collect()
}

/// Builds the `--`-trailing-argument dict handed to user scripts (§6.1):
/// `{arg0: "...", arg1: "...", ...}`.
#[must_use]
pub fn args_dict(args: &[String]) -> Value {
    let keys: Vec<_> = (0..args.len()).map(|i| SYMBOLS.intern(&format!("arg{i}"))).collect();
    let values: Vec<Value> = args.iter().map(|a| Value::Vector(Vector::string(a).expect("arena allocation for script args"))).collect();
    let keys = Vector::symbol(&keys).expect("arena allocation for script arg keys");
    Value::Dict(Dict::new(keys, values).expect("keys and values built with matching length"))
}

#[cfg(test)]
mod script_test {
    use super::*;
    use rayforce_storage::ser_raw;

    #[test]
    fn a_round_tripped_value_decodes_back_through_hex() {
        let original = Value::I64(42);
        let bytes = ser_raw(&original).unwrap();
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        let decoded = decode_line(&hex).unwrap();
        assert!(matches!(decoded, Value::I64(42)));
    }

    #[test]
    fn odd_length_hex_is_rejected() {
        assert!(decode_line("abc").is_err());
    }

    #[test]
    fn args_dict_names_positional_keys() {
        let dict = args_dict(&["hello".to_string(), "world".to_string()]);
        let Value::Dict(d) = dict else { panic!("expected a dict") };
        assert_eq!(d.values().len(), 2);
    }
}
