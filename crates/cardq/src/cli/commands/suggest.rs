//! Implementation of `cardq suggest`.

use std::process::ExitCode;

use crate::cli::{args::SuggestCommand, context::CommandContext, output::output_suggest};

/// Suggests completions for the token under the caret.
pub fn run(ctx: &mut CommandContext, cmd: &SuggestCommand) -> ExitCode {
    let language = cmd
        .language
        .clone()
        .unwrap_or_else(|| ctx.config.suggest.language.clone());
    let limit = cmd.limit.unwrap_or(ctx.config.suggest.max_count);
    let caret = cmd.caret.unwrap_or(cmd.query.len());

    let index = match ctx.loaded_index() {
        Ok(index) => index,
        Err(code) => return code,
    };
    let suggest = index
        .suggester()
        .suggest(&cmd.query, caret, &language, limit);
    output_suggest(&suggest, cmd.json)
}
