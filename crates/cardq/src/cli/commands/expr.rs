//! Implementation of `cardq expr`.

use std::process::ExitCode;

use cardq_index::{CardAnalyzer, CardDocumentAdapter, FieldRef, UserField};

use crate::cli::{args::ExprCommand, output::dim};

/// Prints the query fragment matching free text in a field.
pub fn run(cmd: &ExprCommand) -> ExitCode {
    let field = match CardDocumentAdapter::new().resolve(&cmd.field) {
        Some(FieldRef::Field(field)) => field,
        Some(FieldRef::Like | FieldRef::Any) => UserField::Name,
        None => {
            eprintln!("error: unknown field '{}'", cmd.field);
            return ExitCode::FAILURE;
        }
    };

    match CardAnalyzer::new().value_expression(field, &cmd.value) {
        Some(expr) => {
            println!("{}:{expr}", field.name());
            ExitCode::SUCCESS
        }
        None => {
            println!("{}", dim("(value has no searchable terms)"));
            ExitCode::SUCCESS
        }
    }
}
