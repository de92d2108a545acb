// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Command-line surface (§6.1). Flag *parsing* is an in-scope ambient
//! concern; what a loaded script's bytes mean is not -- see
//! [`crate::script`].

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rayforce", about = "An interactive, array-oriented in-memory data engine")]
pub struct Cli {
    /// Load and execute a script on startup.
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Positional form of `--file`.
    #[arg(value_name = "FILE")]
    pub positional_file: Option<PathBuf>,

    /// Listen on the given TCP port for IPC clients.
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Cap the worker pool to n threads (0 = auto, = CPU count).
    #[arg(short, long, default_value_t = 0)]
    pub cores: usize,

    /// Enable lightweight per-expression timing.
    #[arg(short, long, value_name = "0|1", default_value_t = 0)]
    pub timeit: u8,

    /// Stay in the REPL after executing the script.
    #[arg(short, long)]
    pub interactive: bool,

    /// Everything after `--`, passed to user scripts as a dict.
    #[arg(last = true)]
    pub script_args: Vec<String>,
}

impl Cli {
    #[must_use]
    pub fn file(&self) -> Option<&PathBuf> {
        self.file.as_ref().or(self.positional_file.as_ref())
    }

    #[must_use]
    pub fn resolved_cores(&self) -> usize {
        if self.cores == 0 {
            num_cpus::get()
        } else {
            self.cores.min(num_cpus::get())
        }
    }
}
