//! Finds the token being edited at a caret position.

use crate::{
    lexer::tokenize,
    token::{Token, TokenType},
};

/// Clamps `caret` into `query` and moves it back to a character boundary.
pub fn clamp_caret(query: &str, caret: usize) -> usize {
    let mut caret = caret.min(query.len());
    while !query.is_char_boundary(caret) {
        caret -= 1;
    }
    caret
}

/// Returns the token under the caret, or `None` when the caret sits in
/// whitespace, between non-editable tokens, or the query is empty.
///
/// When the caret directly follows a colon, an opening bracket, or an opening
/// quote, a zero-length [`TokenType::FieldValue`] is synthesized at the caret so
/// completions can still be offered for the value about to be typed.
pub fn edited_token(query: &str, caret: usize) -> Option<Token> {
    let caret = clamp_caret(query, caret);
    edited_token_in(&tokenize(query), caret)
}

/// Same as [`edited_token`] for an already tokenized query.
pub fn edited_token_in(tokens: &[Token], caret: usize) -> Option<Token> {
    if let Some(token) = tokens
        .iter()
        .find(|t| t.position < caret && caret < t.end())
    {
        return token.token_type.is_editable().then(|| token.clone());
    }

    let starting = tokens
        .iter()
        .find(|t| t.position == caret && t.token_type.is_editable());

    if let Some(ending) = tokens.iter().rev().find(|t| t.end() == caret) {
        if ending.token_type.is_editable() {
            return Some(ending.clone());
        }
        if ending.token_type.opens_value() {
            return Some(starting.cloned().unwrap_or_else(|| {
                Token::new(
                    TokenType::FieldValue,
                    caret,
                    "",
                    ending.parent_field.clone(),
                )
            }));
        }
    }

    starting.cloned()
}
