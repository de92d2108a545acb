// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Entry point: parses the CLI (§6.1), wires up logging (§6.4), then runs
//! one of oneshot/REPL/server mode depending on the flags given.

mod cli;
mod logging;
mod repl;
mod script;
mod server;

use clap::Parser;
use cli::Cli;
use colored::Colorize;
use rayforce_runtime::{Pool, Timers};
use rayforce_vm::{Environment, Evaluator};
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let mut evaluator = Evaluator::new(Environment::new());
    evaluator.set_timeit(cli.timeit != 0);

    if let Some(arg0) = cli.script_args.first().map(|_| script::args_dict(&cli.script_args)) {
        evaluator.global.set(rayforce_core::SYMBOLS.intern("args"), arg0);
    }

    let mut oneshot_failed = false;
    if let Some(path) = cli.file() {
        match script::load_script(path) {
            Ok(term) => {
                if let Err(e) = evaluator.eval(&term) {
                    eprintln!("{}", e.to_string().red());
                    oneshot_failed = true;
                }
            }
            Err(e) => {
                eprintln!("{}", e.to_string().red());
                oneshot_failed = true;
            }
        }
    }

    if let Some(port) = cli.port {
        let pool = Pool::new(cli.resolved_cores(), 4096);
        let mut timers = Timers::new();
        if let Err(e) = server::run(port, evaluator.global.clone(), &pool, &mut timers) {
            eprintln!("{}", e.to_string().red());
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    if cli.file().is_none() || cli.interactive {
        repl::run(&mut evaluator);
        return ExitCode::SUCCESS;
    }

    if oneshot_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
