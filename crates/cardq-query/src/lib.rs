//! Query tokenization for cardq search boxes.
//!
//! Card queries use a Lucene-flavoured syntax:
//!
//! - **Values**: `fireball` - bare words searched across all fields
//! - **Fields**: `name:fire` - restrict a value to one field
//! - **Phrases**: `text:"draw a card"` - quoted sequences
//! - **Booleans**: `AND`, `OR`, `NOT`, `&&`, `||`, `!`, `+`, `-`
//! - **Groups**: `type:(goblin OR elf)` - scoped sub-expressions
//! - **Ranges**: `cmc:[2 TO 4]`, `power:{1 TO 5}`
//! - **Regex**: `name:/fire.*/`
//! - **Modifiers**: `fire~1`, `bolt^2`
//!
//! Unlike a parser, the tokenizer never fails on incomplete input: every byte of
//! the query belongs to exactly one token, so an editor can always tell which
//! token sits under the caret.
//!
//! # Example
//!
//! ```
//! use cardq_query::{TokenType, edited_token};
//!
//! let token = edited_token("name:fire", 9).unwrap();
//! assert_eq!(token.token_type, TokenType::FieldValue);
//! assert_eq!(token.value, "fire");
//! assert_eq!(token.parent_field.as_deref(), Some("name"));
//! ```

#![warn(missing_docs)]

mod error;
mod escape;
mod lexer;
mod locator;
mod token;

pub use error::LexError;
pub use escape::{escape, is_reserved, unescape};
pub use lexer::{tokenize, tokenize_strict};
pub use locator::{clamp_caret, edited_token, edited_token_in};
pub use token::{Token, TokenType};
