//! Implementation of `cardq values`.

use std::process::ExitCode;

use crate::cli::{args::ValuesCommand, context::CommandContext, output::output_values};

/// Suggests values of one field, or of every field.
pub fn run(ctx: &mut CommandContext, cmd: &ValuesCommand) -> ExitCode {
    let language = cmd
        .language
        .clone()
        .unwrap_or_else(|| ctx.config.suggest.language.clone());
    let limit = cmd.limit.unwrap_or(ctx.config.suggest.max_count);

    let index = match ctx.loaded_index() {
        Ok(index) => index,
        Err(code) => return code,
    };
    let value = cmd.value.to_lowercase();
    match index
        .suggester()
        .suggest_values(&value, cmd.field.as_deref(), &language, limit)
    {
        Ok(values) => output_values(&values, cmd.json),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
