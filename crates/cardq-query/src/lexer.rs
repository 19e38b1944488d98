//! Tolerant query lexer.
//!
//! Splits a query into tokens that cover the input without gaps. Malformed input
//! (unclosed quotes, stray brackets, dangling colons) still yields tokens; the
//! problems are collected and only surface through [`tokenize_strict`].

use std::{iter::Peekable, str::Chars};

use crate::{
    error::LexError,
    token::{Token, TokenType},
};

/// Boolean keywords recognized as whole words.
const KEYWORDS: &[&str] = &["AND", "OR", "NOT"];

/// An open group or range.
struct Scope {
    /// Field the group's values belong to.
    field: Option<String>,
    /// Bracket that closes this scope.
    closer: char,
    /// Byte position of the opening bracket.
    position: usize,
}

/// Tokenizes a query string.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
    /// Current byte position in input.
    position: usize,
    /// Tokens produced so far.
    tokens: Vec<Token>,
    /// Open groups, innermost last.
    scopes: Vec<Scope>,
    /// Field awaiting its value after a colon.
    pending_field: Option<String>,
    /// Problems found along the way.
    issues: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
            tokens: Vec::new(),
            scopes: Vec::new(),
            pending_field: None,
            issues: Vec::new(),
        }
    }

    /// Records a problem at a specific position.
    fn issue_at(&mut self, message: impl Into<String>, position: usize) {
        self.issues.push(LexError::new(message, position, self.input));
    }

    /// Tokenizes the entire input.
    fn run(mut self) -> (Vec<Token>, Vec<LexError>) {
        while let Some(&ch) = self.chars.peek() {
            match ch {
                c if c.is_whitespace() => self.read_whitespace(),
                '"' => self.read_phrase(),
                '(' | '[' | '{' => self.read_open(ch),
                ')' | ']' | '}' => self.read_close(ch),
                '^' | '~' => self.read_modifier(),
                '/' if self.at_term_start() => self.read_regex(),
                '&' | '|' if self.peek_second() == Some(ch) => {
                    let start = self.position;
                    self.advance();
                    self.advance();
                    self.push(TokenType::Boolean, start, None);
                }
                '!' | '+' | '-' if self.at_term_start() => {
                    let start = self.position;
                    self.advance();
                    self.push(TokenType::Boolean, start, None);
                }
                _ => self.read_word(),
            }
        }

        while let Some(scope) = self.scopes.pop() {
            let message = if scope.closer == ')' {
                "unclosed '('"
            } else {
                "unclosed range"
            };
            self.issue_at(message, scope.position);
        }
        self.issues.sort_by_key(|issue| issue.position);
        (self.tokens, self.issues)
    }

    /// Pushes a token spanning `start..position`.
    fn push(&mut self, token_type: TokenType, start: usize, parent_field: Option<String>) {
        let value = &self.input[start..self.position];
        self.tokens
            .push(Token::new(token_type, start, value, parent_field));
    }

    /// True when the next character begins a new term.
    fn at_term_start(&self) -> bool {
        self.tokens.last().is_none_or(|token| {
            matches!(
                token.token_type,
                TokenType::Whitespace | TokenType::Open | TokenType::Colon | TokenType::Boolean
            )
        })
    }

    /// Looks one character past the current one.
    fn peek_second(&self) -> Option<char> {
        self.input[self.position..].chars().nth(1)
    }

    /// Field of the innermost enclosing group.
    fn scope_field(&self) -> Option<String> {
        self.scopes.last().and_then(|scope| scope.field.clone())
    }

    /// Field the next value belongs to, consuming a pending colon binding.
    fn value_field(&mut self) -> Option<String> {
        self.pending_field.take().or_else(|| self.scope_field())
    }

    /// True inside `[..]` or `{..}`.
    fn in_range(&self) -> bool {
        self.scopes.last().is_some_and(|scope| scope.closer != ')')
    }

    /// Reads a run of whitespace. A pending field binding survives it.
    fn read_whitespace(&mut self) {
        let start = self.position;
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
        self.push(TokenType::Whitespace, start, None);
    }

    /// Reads a quoted phrase as quote, value, and quote tokens.
    fn read_phrase(&mut self) {
        let parent = self.value_field();
        let open = self.position;
        self.advance();
        self.push(TokenType::QuoteOpen, open, parent.clone());

        let start = self.position;
        self.read_until('"');
        if self.position > start {
            self.push(TokenType::FieldValue, start, parent.clone());
        }

        if self.chars.peek() == Some(&'"') {
            let close = self.position;
            self.advance();
            self.push(TokenType::QuoteClose, close, parent);
        } else {
            self.issue_at("unclosed quote", open);
        }
    }

    /// Reads a `/regex/` value.
    fn read_regex(&mut self) {
        let parent = self.value_field();
        let open = self.position;
        self.advance();
        self.push(TokenType::RegexDelimiter, open, parent.clone());

        let start = self.position;
        self.read_until('/');
        if self.position > start {
            self.push(TokenType::RegexBody, start, parent.clone());
        }

        if self.chars.peek() == Some(&'/') {
            let close = self.position;
            self.advance();
            self.push(TokenType::RegexDelimiter, close, parent);
        } else {
            self.issue_at("unclosed regex", open);
        }
    }

    /// Advances up to, not past, an unescaped `delimiter`.
    fn read_until(&mut self, delimiter: char) {
        while let Some(&ch) = self.chars.peek() {
            if ch == delimiter {
                break;
            }
            self.advance();
            if ch == '\\' {
                self.advance();
            }
        }
    }

    /// Reads an opening parenthesis or range bracket.
    fn read_open(&mut self, ch: char) {
        let field = self.value_field();
        let start = self.position;
        self.advance();
        self.push(TokenType::Open, start, field.clone());
        let closer = match ch {
            '[' => ']',
            '{' => '}',
            _ => ')',
        };
        self.scopes.push(Scope {
            field,
            closer,
            position: start,
        });
    }

    /// Reads a closing parenthesis or range bracket.
    fn read_close(&mut self, ch: char) {
        let start = self.position;
        self.advance();
        self.pending_field = None;

        let Some(scope) = self.scopes.pop() else {
            self.issue_at(format!("unbalanced '{ch}'"), start);
            self.push(TokenType::Close, start, None);
            return;
        };
        let ranges_close = scope.closer != ')' && matches!(ch, ']' | '}');
        if scope.closer != ch && !ranges_close {
            self.issue_at(format!("expected '{}', found '{ch}'", scope.closer), start);
        }
        self.push(TokenType::Close, start, scope.field);
    }

    /// Reads a `~` or `^` modifier and its optional number.
    fn read_modifier(&mut self) {
        let start = self.position;
        self.advance();
        self.push(TokenType::Modifier, start, None);

        let number_start = self.position;
        let mut seen_dot = false;
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() || (ch == '.' && !seen_dot) {
                seen_dot |= ch == '.';
                self.advance();
            } else {
                break;
            }
        }
        if self.position > number_start {
            self.push(TokenType::ModifierValue, number_start, None);
        }
    }

    /// Reads a word: a field name, a keyword, or a value.
    fn read_word(&mut self) {
        let start = self.position;
        while let Some(&ch) = self.chars.peek() {
            if is_word_terminator(ch) {
                break;
            }
            self.advance();
            if ch == '\\' {
                self.advance();
            }
        }

        if self.chars.peek() == Some(&':') {
            self.read_field(start);
            return;
        }

        let word = &self.input[start..self.position];
        if self.in_range() && word == "TO" {
            let field = self.scope_field();
            self.push(TokenType::RangeTo, start, field);
        } else if self.pending_field.is_none() && KEYWORDS.contains(&word) {
            self.push(TokenType::Boolean, start, None);
        } else {
            let field = self.value_field();
            self.push(TokenType::FieldValue, start, field);
        }
    }

    /// Emits a field token for `start..position` and the colon after it.
    fn read_field(&mut self, start: usize) {
        let field = (self.position > start).then(|| self.input[start..self.position].to_string());
        if let Some(name) = &field {
            self.push(TokenType::Field, start, None);
            if self.pending_field.is_some() {
                self.issue_at(format!("field '{name}' has no value before it"), start);
            }
        }

        let colon = self.position;
        self.advance();
        if field.is_none() {
            self.issue_at("':' without a field name", colon);
        }
        self.push(TokenType::Colon, colon, field.clone());
        self.pending_field = field;
    }

    /// Advances to the next character.
    fn advance(&mut self) {
        if let Some(ch) = self.chars.next() {
            self.position += ch.len_utf8();
        }
    }
}

/// Characters that end a bare word.
fn is_word_terminator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '"' | ':' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '~')
}

/// Tokenizes a query, tolerating incomplete or malformed input.
///
/// The returned tokens cover the input without gaps or overlaps, in order.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).run().0
}

/// Tokenizes a query, failing on the first syntax problem.
pub fn tokenize_strict(input: &str) -> Result<Vec<Token>, LexError> {
    let (tokens, mut issues) = Lexer::new(input).run();
    if issues.is_empty() {
        Ok(tokens)
    } else {
        Err(issues.swap_remove(0))
    }
}
