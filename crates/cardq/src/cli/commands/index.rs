//! Implementation of `cardq index`.

use std::process::ExitCode;

use tracing::info;

use crate::cli::{
    args::IndexCommand,
    context::CommandContext,
    output::{BuildProgress, dim, success},
};

/// Builds stale indexes, or all of them with `--force`.
pub fn run(ctx: &mut CommandContext, cmd: &IndexCommand) -> ExitCode {
    let index = match ctx.card_index() {
        Ok(index) => index,
        Err(code) => return code,
    };

    if cmd.force {
        info!("invalidating indexes");
        if let Err(e) = index.invalidate_index() {
            eprintln!("error: failed to invalidate index: {e}");
            return ExitCode::FAILURE;
        }
    } else if index.is_up_to_date() {
        println!("{}", dim("Indexes are up to date."));
    }

    let mut progress = BuildProgress::default();
    if let Err(e) = index.load_index(&mut progress) {
        eprintln!("error: indexing failed: {e}");
        return ExitCode::FAILURE;
    }

    println!(
        "{} {}",
        success("Index ready"),
        dim(&format!("({})", index.options().root.display()))
    );
    ExitCode::SUCCESS
}
