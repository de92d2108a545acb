// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! The interactive loop (§4.9 READY -> EVAL -> READY/ERROR): print a
//! prompt, read a line, decode it, evaluate, print the result or a
//! colorized error, loop. Errors never stop the loop -- only EOF does.

use colored::Colorize;
use rayforce_vm::Evaluator;
use std::io::{self, BufRead, Write};

pub fn run(evaluator: &mut Evaluator) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("rayforce> ");
        if io::stdout().flush().is_err() {
            return;
        }
        let Some(line) = lines.next() else {
            println!();
            return;
        };
        let Ok(line) = line else {
            return;
        };
        if line.trim().is_empty() {
            continue;
        }
        step(evaluator, &line);
    }
}

fn step(evaluator: &mut Evaluator, line: &str) {
    let term = match crate::script::decode_line(line) {
        Ok(term) => term,
        Err(e) => {
            print_error(&e.to_string());
            return;
        }
    };
    match evaluator.eval(&term) {
        Ok(value) => println!("{value:?}"),
        Err(e) => print_error(&e.to_string()),
    }
}

fn print_error(message: &str) {
    eprintln!("{}", message.red());
}
