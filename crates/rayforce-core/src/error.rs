// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The error-kind taxonomy and the `RayError` value itself (§7).
//!
//! Errors are ordinary values at the VM level (an `ERROR` compound), but
//! within the Rust implementation they also need to flow as `Result::Err`
//! through fallible Rust APIs (arena allocation, the wire codec, IPC). This
//! type serves both roles: it is what `rayforce_value::Value::Error` wraps
//! and what every `Result<_, RayError>` in the workspace returns.

use std::fmt;

/// Stable error-kind taxonomy (§7). Numeric values are the on-wire error
/// code stored in the `ERROR` compound's first byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Malformed input text (raised by the external parser).
    Parse = 0,
    /// Unsupported operand types for a primitive.
    Type = 1,
    /// Mismatched vector lengths, or length below what's required.
    Length = 2,
    /// Value out of range for the operation (e.g. negative sqrt).
    Domain = 3,
    /// Wrong number of arguments.
    Arity = 4,
    /// Read/write/open failure; carries an OS errno and the attempted path.
    Io = 5,
    /// popen/subprocess failure.
    Sys = 6,
    /// Feature gap: recognized but unimplemented.
    NotImplemented = 7,
    /// Feature gap: recognized and deliberately unsupported.
    NotSupported = 8,
    /// Allocator exhausted.
    Memory = 9,
}

impl ErrorKind {
    #[must_use]
    pub const fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0 => Self::Parse,
            1 => Self::Type,
            2 => Self::Length,
            3 => Self::Domain,
            4 => Self::Arity,
            5 => Self::Io,
            6 => Self::Sys,
            7 => Self::NotImplemented,
            8 => Self::NotSupported,
            9 => Self::Memory,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parse => "PARSE",
            Self::Type => "TYPE",
            Self::Length => "LENGTH",
            Self::Domain => "DOMAIN",
            Self::Arity => "ARITY",
            Self::Io => "IO",
            Self::Sys => "SYS",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::NotSupported => "NOT_SUPPORTED",
            Self::Memory => "MEMORY",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin tag for `Io`/`Sys` errors (`os_ray_error_type_t` in `ops.h`):
/// distinguishes a plain OS syscall failure from a subprocess failure from
/// a socket failure, so diagnostics can point at the right layer without
/// parsing the message text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorOrigin {
    /// A syscall on a regular file or path (`open`, `read`, `write`, ...).
    Os,
    /// A subprocess (`popen`/`fork`+`exec`) failure.
    Sys,
    /// A socket syscall (`accept`, `connect`, `send`, `recv`, ...).
    Sock,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Os => "os",
            Self::Sys => "sys",
            Self::Sock => "sock",
        })
    }
}

/// Source-span metadata attached to an error for REPL/IPC diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SourceSpan {
    pub filename: String,
    pub offset: u32,
    pub length: u32,
}

/// A RayforceDB error: kind, message, optional source span, and (for
/// `Io`/`Sys`) an [`ErrorOrigin`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RayError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Option<SourceSpan>,
    pub origin: Option<ErrorOrigin>,
}

impl RayError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            origin: None,
        }
    }

    /// `sys_error` (`ops.h`): an `Io` or `Sys` failure tagged with the
    /// syscall/subprocess/socket layer it originated from.
    #[must_use]
    pub fn sys_error(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        let kind = if origin == ErrorOrigin::Sys { ErrorKind::Sys } else { ErrorKind::Io };
        Self {
            kind,
            message: message.into(),
            span: None,
            origin: Some(origin),
        }
    }

    #[must_use]
    pub fn with_span(mut self, filename: impl Into<String>, offset: u32, length: u32) -> Self {
        self.span = Some(SourceSpan {
            filename: filename.into(),
            offset,
            length,
        });
        self
    }

    #[must_use]
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, message)
    }

    #[must_use]
    pub fn length_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Length, message)
    }

    #[must_use]
    pub fn arity_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Arity, message)
    }

    #[must_use]
    pub fn memory() -> Self {
        Self::new(ErrorKind::Memory, "allocator exhausted")
    }

    /// An IO error carrying the OS errno and the path that triggered it.
    #[must_use]
    pub fn io(path: impl Into<String>, source: &std::io::Error) -> Self {
        let path = path.into();
        let errno = source.raw_os_error().unwrap_or(-1);
        let mut err = Self::new(ErrorKind::Io, format!("{path}: {source} (errno {errno})"));
        err.origin = Some(ErrorOrigin::Os);
        err
    }
}

impl fmt::Display for RayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(origin) = self.origin {
            write!(f, " [{origin}]")?;
        }
        if let Some(span) = &self.span {
            write!(f, " ({}:{}+{})", span.filename, span.offset, span.length)?;
        }
        Ok(())
    }
}

impl std::error::Error for RayError {}

#[cfg(test)]
mod error_test;
