//! Implementation of `cardq check`.

use std::process::ExitCode;

use cardq_query::tokenize_strict;

use crate::cli::{args::CheckCommand, output::success};

/// Reports the first syntax error in a query, if any.
pub fn run(cmd: &CheckCommand) -> ExitCode {
    match tokenize_strict(&cmd.query) {
        Ok(tokens) => {
            println!("{} ({} tokens)", success("ok"), tokens.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.format_with_context());
            ExitCode::FAILURE
        }
    }
}
