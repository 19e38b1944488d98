//! Implementation of `cardq tokenize`.

use std::process::ExitCode;

use cardq_query::tokenize;

use crate::cli::{args::TokenizeCommand, output::output_tokens};

/// Prints the tolerant token stream of a query.
pub fn run(cmd: &TokenizeCommand) -> ExitCode {
    let tokens = tokenize(&cmd.query);
    output_tokens(&tokens, cmd.json)
}
