//! Command-line interface for cardq.

mod cli;

use std::process::ExitCode;

use cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands, logging,
};

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(cli.verbose);

    let needs_config = !matches!(
        cli.command,
        Commands::Init(_) | Commands::Tokenize(_) | Commands::Check(_) | Commands::Expr(_)
    );
    let context = if needs_config {
        CommandContext::load()
    } else {
        CommandContext::load_cwd_only()
    };
    let mut ctx = match context {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &mut ctx)
}
