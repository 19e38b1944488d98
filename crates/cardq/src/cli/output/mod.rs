//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use cardq_index::{BuildStats, IndexKind, IntellisenseSuggest, ProgressReporter};
use cardq_query::{Token, TokenType};
use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;

/// ANSI color codes for terminal output.
mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Green text.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text.
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim text.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", colors::GREEN, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

/// Prints build progress on stderr.
#[derive(Default)]
pub struct BuildProgress {
    /// Last percentage printed per build, to avoid flooding the terminal.
    last_percent: Option<usize>,
}

impl ProgressReporter for BuildProgress {
    fn on_set_indexed(&mut self, kind: IndexKind, done: usize, total: usize) {
        let percent = (done * 100).checked_div(total).unwrap_or(100);
        if self.last_percent.is_some_and(|last| percent < last + 10) && done < total {
            return;
        }
        self.last_percent = Some(percent);
        eprintln!("{}", dim(&format!("  {kind}: {done}/{total} sets")));
    }

    fn on_saving(&mut self, kind: IndexKind) {
        eprintln!("{}", dim(&format!("  {kind}: saving")));
    }

    fn on_complete(&mut self, stats: &BuildStats) {
        self.last_percent = None;
        eprintln!(
            "Built {}: {} sets, {} cards, {} documents",
            stats.kind, stats.sets_indexed, stats.cards_indexed, stats.documents
        );
    }
}

/// JSON form of a token.
#[derive(Serialize)]
pub struct JsonToken {
    /// Token type name.
    #[serde(rename = "type")]
    token_type: String,
    /// Byte offset.
    position: usize,
    /// Byte length.
    length: usize,
    /// Raw text.
    value: String,
    /// Field in scope, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_field: Option<String>,
}

impl From<&Token> for JsonToken {
    fn from(token: &Token) -> Self {
        Self {
            token_type: type_name(token.token_type),
            position: token.position,
            length: token.len(),
            value: token.value.clone(),
            parent_field: token.parent_field.clone(),
        }
    }
}

/// One suggested completion.
#[derive(Serialize)]
struct JsonSuggestion {
    /// Text to insert.
    value: String,
    /// Token type of the suggestion.
    #[serde(rename = "type")]
    token_type: String,
}

/// JSON output for `cardq suggest`.
#[derive(Serialize)]
struct JsonSuggest {
    /// Token to replace.
    token: Option<JsonToken>,
    /// Ranked suggestions.
    suggestions: Vec<JsonSuggestion>,
}

/// Display name of a token type.
pub fn type_name(token_type: TokenType) -> String {
    format!("{token_type:?}")
}

/// Serializes `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints tokens as JSON or as a table.
pub fn output_tokens(tokens: &[Token], json: bool) -> ExitCode {
    if json {
        let tokens: Vec<JsonToken> = tokens.iter().map(JsonToken::from).collect();
        return print_json(&tokens);
    }

    if tokens.is_empty() {
        println!("{}", dim("(no tokens)"));
        return ExitCode::SUCCESS;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Type", "Position", "Length", "Value", "Field"]);
    for token in tokens {
        table.add_row(vec![
            Cell::new(type_name(token.token_type)),
            Cell::new(token.position),
            Cell::new(token.len()),
            Cell::new(format!("{:?}", token.value)),
            Cell::new(token.parent_field.as_deref().unwrap_or("")),
        ]);
    }
    println!("{table}");
    ExitCode::SUCCESS
}

/// Prints a suggestion response as JSON or as a list.
pub fn output_suggest(suggest: &IntellisenseSuggest, json: bool) -> ExitCode {
    if json {
        let output = JsonSuggest {
            token: suggest.token.as_ref().map(JsonToken::from),
            suggestions: suggest
                .iter()
                .map(|(value, token_type)| JsonSuggestion {
                    value: value.to_string(),
                    token_type: type_name(token_type),
                })
                .collect(),
        };
        return print_json(&output);
    }

    let Some(token) = &suggest.token else {
        println!("{}", dim("No token under the caret."));
        return ExitCode::SUCCESS;
    };

    println!(
        "{} {} {}",
        subheader("Replace:"),
        format_args!("{:?}", token.value),
        dim(&format!("({}..{})", token.position, token.end()))
    );
    if suggest.is_empty() {
        println!("{}", dim("No suggestions."));
        return ExitCode::SUCCESS;
    }
    for (value, token_type) in suggest.iter() {
        println!("   {value} {}", dim(&format!("[{}]", type_name(token_type))));
    }
    ExitCode::SUCCESS
}

/// Prints suggested values as JSON or one per line.
pub fn output_values(values: &[String], json: bool) -> ExitCode {
    if json {
        return print_json(&values);
    }
    if values.is_empty() {
        println!("{}", dim("No suggestions."));
    }
    for value in values {
        println!("{value}");
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_json_shape() {
        let token = Token::new(TokenType::FieldValue, 5, "fire", Some("name".to_string()));
        let json = serde_json::to_value(JsonToken::from(&token)).unwrap();
        assert_eq!(json["type"], "FieldValue");
        assert_eq!(json["position"], 5);
        assert_eq!(json["length"], 4);
        assert_eq!(json["parent_field"], "name");
    }

    #[test]
    fn unbound_token_omits_field() {
        let token = Token::new(TokenType::Boolean, 0, "AND", None);
        let json = serde_json::to_value(JsonToken::from(&token)).unwrap();
        assert!(json.get("parent_field").is_none());
    }

    #[test]
    fn progress_throttles_output() {
        let mut progress = BuildProgress::default();
        progress.on_set_indexed(IndexKind::Documents, 1, 100);
        assert_eq!(progress.last_percent, Some(1));
        progress.on_set_indexed(IndexKind::Documents, 5, 100);
        assert_eq!(progress.last_percent, Some(1));
        progress.on_set_indexed(IndexKind::Documents, 11, 100);
        assert_eq!(progress.last_percent, Some(11));
    }
}
