//! Text analysis for card fields and user-typed values.
//!
//! Two analyzers are registered with every Tantivy index:
//! 1. [`CARD_TOKENIZER`] splits text into words, emitting each CJK character as
//!    its own term, then lowercases, folds accents to ASCII, and drops very
//!    long tokens.
//! 2. [`KEYWORD_TOKENIZER`] keeps the whole value as one lowercased term.
//!
//! The same analyzers normalize partially typed values at suggestion time, so
//! terms compare equal to what was indexed.

use std::{iter::Peekable, str::CharIndices};

use cardq_query::escape;
use tantivy::{
    Index,
    tokenizer::{
        AsciiFoldingFilter, LowerCaser, RawTokenizer, RemoveLongFilter, TextAnalyzer, Token,
        TokenStream, Tokenizer,
    },
};

use crate::fields::UserField;

/// Name of the word tokenizer registered with Tantivy.
pub const CARD_TOKENIZER: &str = "cardq_text";

/// Name of the whole-value tokenizer registered with Tantivy.
pub const KEYWORD_TOKENIZER: &str = "cardq_keyword";

/// Maximum token length in bytes before filtering.
const MAX_TOKEN_LENGTH: usize = 40;

/// True for ideographs and syllabaries that carry no word separators.
fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}'   // Hiragana
        | '\u{30A0}'..='\u{30FF}' // Katakana
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7AF}' // Hangul
        | '\u{F900}'..='\u{FAFF}')
}

/// Splits on non-alphanumeric characters; each CJK character is a term.
#[derive(Clone, Default)]
pub struct CardTextTokenizer {
    /// Reused token buffer.
    token: Token,
}

/// Stream produced by [`CardTextTokenizer`].
pub struct CardTextTokenStream<'a> {
    /// Source text.
    text: &'a str,
    /// Remaining characters with byte offsets.
    chars: Peekable<CharIndices<'a>>,
    /// Token being produced.
    token: &'a mut Token,
}

impl Tokenizer for CardTextTokenizer {
    type TokenStream<'a> = CardTextTokenStream<'a>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> CardTextTokenStream<'a> {
        self.token.reset();
        CardTextTokenStream {
            text,
            chars: text.char_indices().peekable(),
            token: &mut self.token,
        }
    }
}

impl CardTextTokenStream<'_> {
    /// Consumes the rest of a word and returns its end offset.
    fn search_token_end(&mut self) -> usize {
        while let Some(&(offset, c)) = self.chars.peek() {
            if !c.is_alphanumeric() || is_cjk(c) {
                return offset;
            }
            self.chars.next();
        }
        self.text.len()
    }
}

impl TokenStream for CardTextTokenStream<'_> {
    fn advance(&mut self) -> bool {
        self.token.text.clear();
        self.token.position = self.token.position.wrapping_add(1);
        while let Some((offset_from, c)) = self.chars.next() {
            if !c.is_alphanumeric() {
                continue;
            }
            let offset_to = if is_cjk(c) {
                offset_from + c.len_utf8()
            } else {
                self.search_token_end()
            };
            self.token.offset_from = offset_from;
            self.token.offset_to = offset_to;
            self.token.text.push_str(&self.text[offset_from..offset_to]);
            return true;
        }
        false
    }

    fn token(&self) -> &Token {
        self.token
    }

    fn token_mut(&mut self) -> &mut Token {
        self.token
    }
}

/// Builds the word analyzer.
pub fn build_text_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(CardTextTokenizer::default())
        .filter(LowerCaser)
        .filter(AsciiFoldingFilter)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .build()
}

/// Builds the whole-value analyzer.
pub fn build_keyword_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(RawTokenizer::default())
        .filter(LowerCaser)
        .build()
}

/// A normalized term and the byte span of its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedTerm {
    /// Normalized term text.
    pub term: String,
    /// Byte offset of the source text.
    pub offset: usize,
    /// Byte offset just past the source text.
    pub end: usize,
}

/// Field-aware analysis shared by indexing and suggestion.
#[derive(Clone)]
pub struct CardAnalyzer {
    /// Word analyzer.
    text: TextAnalyzer,
    /// Whole-value analyzer.
    keyword: TextAnalyzer,
}

impl Default for CardAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CardAnalyzer {
    /// Creates both analyzers.
    pub fn new() -> Self {
        Self {
            text: build_text_analyzer(),
            keyword: build_keyword_analyzer(),
        }
    }

    /// Registers both analyzers with an index.
    pub fn register(&self, index: &Index) {
        index.tokenizers().register(CARD_TOKENIZER, self.text.clone());
        index
            .tokenizers()
            .register(KEYWORD_TOKENIZER, self.keyword.clone());
    }

    /// Analyzer used to index a field in the document index.
    fn analyzer_for(&self, field: UserField) -> TextAnalyzer {
        if field.metadata().is_not_analyzed {
            self.keyword.clone()
        } else {
            self.text.clone()
        }
    }

    /// Terms of `value` as the document index sees them.
    ///
    /// Every call runs a fresh token stream, so repeated calls agree.
    pub fn tokens(&self, field: UserField, value: &str) -> Vec<AnalyzedTerm> {
        collect_terms(self.analyzer_for(field), value)
    }

    /// Words of `value` as the spellchecker stores them.
    pub fn words(&self, field: UserField, value: &str) -> Vec<AnalyzedTerm> {
        if field.spellchecks_whole_value() {
            collect_terms(self.keyword.clone(), value)
        } else {
            collect_terms(self.text.clone(), value)
        }
    }

    /// Normalizes a typed value for spellchecker lookups.
    pub fn normalize_word(&self, field: UserField, value: &str) -> String {
        self.words(field, value)
            .into_iter()
            .map(|t| t.term)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Renders `value` as a query fragment for `field`.
    ///
    /// The value's source text is kept as typed, including the gaps between
    /// terms and anything after the last one, with reserved characters
    /// escaped. The result is quoted when the value contains a space.
    /// Returns `None` when the value has no terms.
    pub fn value_expression(&self, field: UserField, value: &str) -> Option<String> {
        let terms = self.tokens(field, value);
        if terms.is_empty() {
            return None;
        }

        let mut out = String::with_capacity(value.len() + 2);
        let quoted = value.contains(' ');
        if quoted {
            out.push('"');
        }
        let mut prev_end = 0;
        for term in &terms {
            if term.offset > prev_end {
                out.push_str(&escape(&value[prev_end..term.offset]));
            }
            let start = term.offset.max(prev_end);
            if term.end > start {
                out.push_str(&escape(&value[start..term.end]));
            }
            prev_end = prev_end.max(term.end);
        }
        out.push_str(&escape(&value[prev_end..]));
        if quoted {
            out.push('"');
        }
        Some(out)
    }
}

/// Drains an analyzer's stream into owned terms.
fn collect_terms(mut analyzer: TextAnalyzer, value: &str) -> Vec<AnalyzedTerm> {
    let mut stream = analyzer.token_stream(value);
    let mut terms = Vec::new();
    while stream.advance() {
        let token = stream.token();
        if token.text.is_empty() {
            continue;
        }
        terms.push(AnalyzedTerm {
            term: token.text.clone(),
            offset: token.offset_from,
            end: token.offset_to,
        });
    }
    terms
}
