//! Clap argument definitions for the `cardq` CLI.

use std::{env, process::exit};

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, error::ErrorKind};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "cardq")]
#[command(about = "Card query tokenizer, index, and type-ahead suggestions")]
pub struct Cli {
    /// Log more (-v for info, -vv for debug)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `cardq tokenize`.
#[derive(Args, Debug, Clone)]
pub struct TokenizeCommand {
    /// Query to tokenize
    pub query: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `cardq check`.
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    /// Query to check
    pub query: String,
}

/// Arguments for `cardq suggest`.
#[derive(Args, Debug, Clone)]
pub struct SuggestCommand {
    /// Query being edited
    pub query: String,

    /// Caret byte offset [default: end of query]
    #[arg(short = 'c', long)]
    pub caret: Option<usize>,

    /// UI language [default: from config]
    #[arg(short = 'l', long = "lang")]
    pub language: Option<String>,

    /// Maximum suggestions [default: from config]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `cardq values`.
#[derive(Args, Debug, Clone)]
pub struct ValuesCommand {
    /// Partially typed value
    #[arg(default_value = "")]
    pub value: String,

    /// Field to suggest values for; every field when omitted
    #[arg(short = 'f', long)]
    pub field: Option<String>,

    /// UI language [default: from config]
    #[arg(short = 'l', long = "lang")]
    pub language: Option<String>,

    /// Maximum suggestions [default: from config]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `cardq expr`.
#[derive(Args, Debug, Clone)]
pub struct ExprCommand {
    /// Field the value belongs to
    pub field: String,

    /// Free text to turn into a query fragment
    pub value: String,
}

/// Arguments for `cardq index`.
#[derive(Args, Debug, Clone)]
pub struct IndexCommand {
    /// Rebuild even when the indexes are up to date
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `cardq init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `cardq` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Split a query into typed tokens
    #[command(after_help = "\
QUERY SYNTAX:
  fire              Value in any field
  name:fire         Value in one field
  name:\"fire bolt\"  Phrase
  name:/fi.e/       Regular expression
  cmc:[2 TO 4]      Range
  fire~1 bolt^2     Fuzzy and boost modifiers
  a AND b, a OR b   Boolean operators (also && || ! + -)")]
    Tokenize(TokenizeCommand),

    /// Report syntax errors in a query
    Check(CheckCommand),

    /// Suggest completions for the token under the caret
    #[command(after_help = "\
EXAMPLES:
  cardq suggest 'rari'              Field names, then values
  cardq suggest 'rarity:my'         Rarity values
  cardq suggest 'name:shiv' -l ru   Russian card names
  cardq suggest 'power:2 AN' -c 10  Boolean operators")]
    Suggest(SuggestCommand),

    /// Suggest values for a field
    Values(ValuesCommand),

    /// Escape free text as a query fragment for a field
    Expr(ExprCommand),

    /// Build or rebuild the search indexes
    Index(IndexCommand),

    /// Show configuration and index status
    Status,

    /// Show effective configuration settings
    Config,

    /// Initialize cardq configuration in current directory
    Init(InitCommand),
}

/// Parses CLI arguments, printing a compact command list for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp && env::args().len() <= 2 {
                print_command_list();
                exit(0);
            }
            e.exit();
        }
    }
}

/// Prints the about line and one line per subcommand.
fn print_command_list() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: cardq [-v] <COMMAND>");
    println!();
    println!("Commands:");
    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:10} {about}");
    }
    println!(
        "  {:<10} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -v, --verbose  Log more (-v for info, -vv for debug)");
    println!("  -h, --help     Print help");
}

#[cfg(test)]
mod tests {
    use cardq_index::DEFAULT_MAX_COUNT;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn suggest_defaults_to_end_of_query() {
        let cli = Cli::try_parse_from(["cardq", "suggest", "name:fire"]).unwrap();
        let Commands::Suggest(cmd) = cli.command else {
            panic!("expected suggest");
        };
        assert_eq!(cmd.query, "name:fire");
        assert!(cmd.caret.is_none());
        assert!(cmd.limit.is_none());
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["cardq", "status", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn limit_parses() {
        let limit = DEFAULT_MAX_COUNT.to_string();
        let cli = Cli::try_parse_from(["cardq", "values", "my", "-f", "rarity", "-n", &limit])
            .unwrap();
        let Commands::Values(cmd) = cli.command else {
            panic!("expected values");
        };
        assert_eq!(cmd.field.as_deref(), Some("rarity"));
        assert_eq!(cmd.limit, Some(DEFAULT_MAX_COUNT));
    }
}
