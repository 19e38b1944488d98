//! Token model shared by the tokenizer, the caret locator, and the suggester.

/// Lexical category of a query token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// A field name followed by a colon, e.g. `name` in `name:fire`.
    Field,
    /// The colon separating a field from its value.
    Colon,
    /// A value, bare or bound to a field.
    FieldValue,
    /// Opening quote of a phrase.
    QuoteOpen,
    /// Closing quote of a phrase.
    QuoteClose,
    /// Slash delimiting a regular expression.
    RegexDelimiter,
    /// Body of a regular expression.
    RegexBody,
    /// Boolean operator: `AND OR NOT && || ! + -`.
    Boolean,
    /// Opening parenthesis or range bracket.
    Open,
    /// Closing parenthesis or range bracket.
    Close,
    /// The `TO` keyword inside a range.
    RangeTo,
    /// Fuzzy (`~`) or boost (`^`) modifier.
    Modifier,
    /// Number following a modifier.
    ModifierValue,
    /// A run of whitespace.
    Whitespace,
}

impl TokenType {
    /// Returns true for tokens whose text the user edits directly.
    pub fn is_editable(self) -> bool {
        matches!(
            self,
            Self::Field | Self::FieldValue | Self::Boolean | Self::ModifierValue | Self::RegexBody
        )
    }

    /// Returns true for tokens after which a value is expected.
    pub fn opens_value(self) -> bool {
        matches!(self, Self::Colon | Self::Open | Self::QuoteOpen)
    }
}

/// A lexical unit of a query with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lexical category.
    pub token_type: TokenType,
    /// Byte offset of the first character.
    pub position: usize,
    /// Raw text, escapes included.
    pub value: String,
    /// Field the token belongs to, if any.
    pub parent_field: Option<String>,
}

impl Token {
    /// Creates a token.
    pub fn new(
        token_type: TokenType,
        position: usize,
        value: impl Into<String>,
        parent_field: Option<String>,
    ) -> Self {
        Self {
            token_type,
            position,
            value: value.into(),
            parent_field,
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// True for synthesized zero-length tokens.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Byte offset one past the last character.
    pub fn end(&self) -> usize {
        self.position + self.value.len()
    }

    /// Checks the token's category.
    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }

    /// Returns the portion of the value left of `caret`.
    ///
    /// The caret is clamped to the token's span and moved back to a character
    /// boundary, so any offset is accepted.
    pub fn value_before(&self, caret: usize) -> &str {
        let mut split = caret.saturating_sub(self.position).min(self.value.len());
        while !self.value.is_char_boundary(split) {
            split -= 1;
        }
        &self.value[..split]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_accessors() {
        let token = Token::new(TokenType::FieldValue, 5, "fire", Some("name".into()));
        assert_eq!(token.len(), 4);
        assert_eq!(token.end(), 9);
        assert!(!token.is_empty());
        assert!(token.is(TokenType::FieldValue));
    }

    #[test]
    fn value_before_clamps() {
        let token = Token::new(TokenType::FieldValue, 5, "fire", None);
        assert_eq!(token.value_before(7), "fi");
        assert_eq!(token.value_before(0), "");
        assert_eq!(token.value_before(100), "fire");
    }

    #[test]
    fn value_before_respects_char_boundaries() {
        let token = Token::new(TokenType::FieldValue, 0, "ёж", None);
        assert_eq!(token.value_before(1), "");
        assert_eq!(token.value_before(3), "ё");
    }

    #[test]
    fn editable_categories() {
        assert!(TokenType::Field.is_editable());
        assert!(TokenType::Boolean.is_editable());
        assert!(!TokenType::Whitespace.is_editable());
        assert!(!TokenType::Colon.is_editable());
        assert!(TokenType::Colon.opens_value());
        assert!(TokenType::QuoteOpen.opens_value());
        assert!(!TokenType::QuoteClose.opens_value());
    }
}
