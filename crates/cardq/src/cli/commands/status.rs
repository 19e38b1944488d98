//! Implementation of `cardq status`.

use std::process::ExitCode;

use cardq_config::{ConfigWarning, discover_config_files};
use cardq_index::IndexKind;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, card data, index status, and validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("cardq init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config_files {
        println!("   {}", path.display());
    }
    println!();

    let config = &ctx.config;
    println!("{}", subheader("Cards:"));
    match &config.cards.path {
        Some(path) if path.is_file() => println!("   {}", path.display()),
        Some(path) => println!("   {} {}", path.display(), warning("[missing]")),
        None => println!("   {}", dim("(none configured)")),
    }
    if !config.cards.sets.is_empty() {
        println!("   {}", dim(&format!("sets: {}", config.cards.sets.join(", "))));
    }
    println!();

    let options = ctx.index_options();
    println!(
        "{} {}",
        subheader("Index:"),
        dim(&format!("({})", options.root.display()))
    );
    for kind in [IndexKind::Documents, IndexKind::Spellchecker] {
        let version = options.version(kind);
        println!(
            "   {kind}: {} {}",
            version.status().description(),
            dim(&format!("[{}]", version.tag))
        );
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();
    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::NoCardsConfigured => {
                println!("{}", dim("Hint: set [cards] path in .cardq.toml"));
            }
            ConfigWarning::UnknownLanguage { .. } => {
                println!(
                    "{}",
                    dim("Hint: languages are en ru de fr it es pt jp cn tw ko")
                );
            }
            _ => {}
        }
    }
}
