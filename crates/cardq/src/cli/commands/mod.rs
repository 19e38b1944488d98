//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod expr;
pub mod index;
pub mod init;
pub mod status;
pub mod suggest;
pub mod tokenize;
pub mod values;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &mut CommandContext) -> ExitCode {
    match command {
        Commands::Tokenize(cmd) => tokenize::run(&cmd),
        Commands::Check(cmd) => check::run(&cmd),
        Commands::Suggest(cmd) => suggest::run(ctx, &cmd),
        Commands::Values(cmd) => values::run(ctx, &cmd),
        Commands::Expr(cmd) => expr::run(&cmd),
        Commands::Index(cmd) => index::run(ctx, &cmd),
        Commands::Status => status::run(ctx),
        Commands::Config => config::run(ctx),
        Commands::Init(cmd) => init::run(ctx, &cmd),
    }
}
