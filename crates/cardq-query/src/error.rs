//! Error types for strict query tokenization.

use std::{error::Error, fmt};

/// Lexer error with position information.
///
/// Only produced by [`crate::tokenize_strict`]; the tolerant tokenizer records
/// the same problems silently and keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Error message.
    pub message: String,
    /// Byte position in input where error occurred.
    pub position: usize,
    /// The original input string.
    pub input: String,
}

impl LexError {
    /// Creates a new lexer error.
    pub fn new(message: impl Into<String>, position: usize, input: &str) -> Self {
        Self {
            message: message.into(),
            position,
            input: input.to_string(),
        }
    }

    /// Formats the error with a position indicator showing where the error occurred.
    pub fn format_with_context(&self) -> String {
        let column = self
            .input
            .get(..self.position)
            .map_or(self.position, |prefix| prefix.chars().count());
        let mut result = String::new();
        result.push_str(&format!("query syntax error: {}\n", self.message));
        result.push_str(&format!("  {}\n", self.input));
        result.push_str(&format!("  {}^", " ".repeat(column)));
        if let Some(hint) = self.hint() {
            result.push_str(&format!("\n  hint: {hint}"));
        }
        result
    }

    /// Returns a short hint for well-known mistakes.
    fn hint(&self) -> Option<&'static str> {
        if self.message.contains("quote") {
            Some("close the phrase with a matching '\"'")
        } else if self.message.contains("regex") {
            Some("close the pattern with a matching '/'")
        } else if self.message.contains("unbalanced") {
            Some("remove the extra closing bracket")
        } else if self.message.contains("unclosed") {
            Some("add the matching closing bracket")
        } else {
            None
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_context())
    }
}

impl Error for LexError {}
