//! Completion suggestions for a query under edit.
//!
//! [`Suggester::suggest`] finds the token under the caret and offers, by
//! token type:
//! - field values, preceded by matching field names when the value is not
//!   bound to a field yet;
//! - every field name ranked against what was typed;
//! - the boolean operators.

use std::{collections::HashSet, sync::Arc};

use cardq_card::{CardRepository, FORMATS};
use cardq_query::{Token, TokenType, clamp_caret, edited_token, unescape};
use tracing::{debug, warn};

use crate::{
    adapter::{CardDocumentAdapter, FieldRef},
    analyzer::CardAnalyzer,
    distance::{most_similar, similarity},
    error::IndexError,
    fields::{UserField, ValueKind},
    slot::{Generation, IndexSlot},
    terms::{f64_terms, i64_terms, text_terms},
    values::ValueCache,
};

/// Default number of suggestions.
pub const DEFAULT_MAX_COUNT: usize = 20;

/// Operators offered for boolean tokens.
pub const BOOLEAN_OPERATORS: &[&str] = &["AND", "OR", "NOT", "&&", "||", "!", "+", "-"];

/// One suggestion response.
///
/// `values` and `types` always have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntellisenseSuggest {
    /// Token to replace when a suggestion is accepted.
    pub token: Option<Token>,
    /// Suggested text.
    pub values: Vec<String>,
    /// Token type of each suggestion.
    pub types: Vec<TokenType>,
}

impl IntellisenseSuggest {
    /// No suggestions and no token.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Suggestions that all share `token_type`.
    fn uniform(token: Token, values: Vec<String>, token_type: TokenType) -> Self {
        let types = vec![token_type; values.len()];
        Self {
            token: Some(token),
            values,
            types,
        }
    }

    /// Number of suggestions.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no suggestions.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Suggestions paired with their types.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TokenType)> {
        self.values
            .iter()
            .map(String::as_str)
            .zip(self.types.iter().copied())
    }
}

/// True when `value` reads as a number.
fn is_numeric(value: &str) -> bool {
    value.parse::<i64>().is_ok() || value.parse::<f64>().is_ok_and(f64::is_finite)
}

/// The first `max_count` terms of `field` in the document index, sorted.
fn indexed_terms(
    generation: &Generation,
    field: UserField,
    language: &str,
    max_count: usize,
) -> Result<Vec<String>, IndexError> {
    let Some(handle) = generation.schema.field(field, language) else {
        return Ok(Vec::new());
    };
    let searcher = generation.documents.searcher();
    Ok(most_similar(text_terms(&searcher, handle)?, "", max_count))
}

/// Computes suggestions against the current index generation.
///
/// Owns its cache of small-domain field values.
pub struct Suggester {
    /// Loaded indexes.
    slot: Arc<IndexSlot>,
    /// Source of small-domain values.
    repository: Arc<CardRepository>,
    /// Field lookup.
    adapter: CardDocumentAdapter,
    /// Value normalization and escaping.
    analyzer: CardAnalyzer,
    /// Small-domain values per field.
    cache: ValueCache,
}

impl Suggester {
    /// Creates a suggester over a shared slot.
    pub(crate) fn new(slot: Arc<IndexSlot>, repository: Arc<CardRepository>) -> Self {
        Self {
            slot,
            repository,
            adapter: CardDocumentAdapter::new(),
            analyzer: CardAnalyzer::new(),
            cache: ValueCache::new(),
        }
    }

    /// Suggestions for the token under `caret` in `query`.
    ///
    /// Never fails: malformed queries and index errors give an empty result.
    pub fn suggest(
        &self,
        query: &str,
        caret: usize,
        language: &str,
        max_count: usize,
    ) -> IntellisenseSuggest {
        let caret = clamp_caret(query, caret);
        let Some(token) = edited_token(query, caret) else {
            return IntellisenseSuggest::empty();
        };
        let value_part = token.value_before(caret).to_string();

        match token.token_type {
            TokenType::FieldValue => {
                let values = self.suggest_token_values(&token, &value_part, language, max_count);
                if token.parent_field.is_some() {
                    return IntellisenseSuggest::uniform(token, values, TokenType::FieldValue);
                }
                let fields = self.suggest_fields(&value_part);
                let types = vec![TokenType::Field; fields.len()]
                    .into_iter()
                    .chain(vec![TokenType::FieldValue; values.len()])
                    .collect();
                IntellisenseSuggest {
                    token: Some(token),
                    values: fields.into_iter().chain(values).collect(),
                    types,
                }
            }
            TokenType::Field => {
                let fields = self.suggest_all_fields(&value_part);
                IntellisenseSuggest::uniform(token, fields, TokenType::Field)
            }
            TokenType::Boolean => {
                let operators = BOOLEAN_OPERATORS.iter().map(|s| s.to_string()).collect();
                IntellisenseSuggest::uniform(token, operators, TokenType::Boolean)
            }
            _ => IntellisenseSuggest::empty(),
        }
    }

    /// Value suggestions for a value token, empty until an index is loaded.
    fn suggest_token_values(
        &self,
        token: &Token,
        value_part: &str,
        language: &str,
        max_count: usize,
    ) -> Vec<String> {
        if self.slot.current().is_none() {
            return Vec::new();
        }
        let value = unescape(value_part).to_lowercase();
        match self.suggest_values(&value, token.parent_field.as_deref(), language, max_count) {
            Ok(values) => values,
            Err(e) => {
                warn!(error = %e, "value suggestion failed");
                Vec::new()
            }
        }
    }

    /// Field names with a trailing colon, including `like`, sorted.
    fn field_names(&self) -> Vec<String> {
        self.adapter
            .field_names()
            .into_iter()
            .map(|name| format!("{name}:"))
            .collect()
    }

    /// Field names containing `value_part`, alphabetically.
    fn suggest_fields(&self, value_part: &str) -> Vec<String> {
        let needle = value_part.to_lowercase();
        self.field_names()
            .into_iter()
            .filter(|name| name.contains(&needle))
            .collect()
    }

    /// All field names, most similar to `value_part` first.
    fn suggest_all_fields(&self, value_part: &str) -> Vec<String> {
        let names = self.field_names();
        if value_part.is_empty() {
            return names;
        }
        let mut scored: Vec<_> = names
            .into_iter()
            .map(|name| (similarity(value_part, &name), name))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().map(|(_, name)| name).collect()
    }

    /// Values of `field` matching `value`.
    ///
    /// `None` or `*` searches every field. `like` searches English names.
    /// Unknown fields give nothing. Fails with [`IndexError::NotLoaded`] if no
    /// load was ever started; while the first load runs the result is empty.
    pub fn suggest_values(
        &self,
        value: &str,
        field: Option<&str>,
        language: &str,
        max_count: usize,
    ) -> Result<Vec<String>, IndexError> {
        let Some(generation) = self.slot.current() else {
            if self.slot.phase().is_busy() {
                return Ok(Vec::new());
            }
            return Err(IndexError::NotLoaded);
        };

        let field = match field {
            None => FieldRef::Any,
            Some(name) => match self.adapter.resolve(name) {
                Some(field) => field,
                None => {
                    debug!(field = name, "no suggestions for unknown field");
                    return Ok(Vec::new());
                }
            },
        };

        match field {
            FieldRef::Like => {
                self.field_values(&generation, UserField::Name, value, "en", max_count)
            }
            FieldRef::Field(field) => {
                self.field_values(&generation, field, value, language, max_count)
            }
            FieldRef::Any => self.any_field_values(&generation, value, language, max_count),
        }
    }

    /// Merges a share of every field's values and ranks them together.
    fn any_field_values(
        &self,
        generation: &Generation,
        value: &str,
        language: &str,
        max_count: usize,
    ) -> Result<Vec<String>, IndexError> {
        let numeric = is_numeric(value);
        let per_field = (max_count / 4).max(1);
        let mut seen = HashSet::new();
        let mut merged = Vec::new();

        for &field in UserField::ALL {
            if field.metadata().is_numeric && !numeric {
                continue;
            }
            for v in self.field_values(generation, field, value, language, per_field)? {
                if seen.insert(v.clone()) {
                    merged.push(v);
                }
            }
        }
        Ok(most_similar(merged, value, max_count))
    }

    /// Values of one field, by the field's value kind.
    fn field_values(
        &self,
        generation: &Generation,
        field: UserField,
        value: &str,
        language: &str,
        max_count: usize,
    ) -> Result<Vec<String>, IndexError> {
        match field.kind() {
            ValueKind::Float | ValueKind::Int => {
                self.numeric_values(generation, field, value, max_count)
            }
            ValueKind::Limited | ValueKind::Combinatoric => {
                let values = self
                    .cache
                    .get_or_compute(field, &self.repository, &self.adapter);
                Ok(most_similar(values.iter().cloned(), value, max_count))
            }
            ValueKind::Legality => Ok(most_similar(FORMATS.iter().copied(), value, FORMATS.len())),
            ValueKind::Text | ValueKind::Keyword if value.is_empty() => {
                indexed_terms(generation, field, language, max_count)
            }
            ValueKind::Text | ValueKind::Keyword => generation
                .words
                .suggest_similar(field, language, value, max_count),
        }
    }

    /// Indexed numbers containing `value`, in ascending numeric order.
    fn numeric_values(
        &self,
        generation: &Generation,
        field: UserField,
        value: &str,
        max_count: usize,
    ) -> Result<Vec<String>, IndexError> {
        let Some(handle) = generation.schema.field(field, "en") else {
            return Ok(Vec::new());
        };
        let searcher = generation.documents.searcher();
        let values: Vec<String> = match field.kind() {
            ValueKind::Int => i64_terms(&searcher, handle)?
                .into_iter()
                .map(|v| v.to_string())
                .collect(),
            _ => f64_terms(&searcher, handle)?
                .into_iter()
                .map(|v| v.to_string())
                .collect(),
        };
        let needle = value.to_lowercase();
        Ok(values
            .into_iter()
            .filter(|v| v.contains(&needle))
            .take(max_count)
            .collect())
    }

    /// Renders `value` as a query fragment for the named field.
    ///
    /// Unknown fields and `*` are analyzed like card names.
    pub fn value_expression(&self, field: &str, value: &str) -> Option<String> {
        let field = match self.adapter.resolve(field) {
            Some(FieldRef::Field(field)) => field,
            _ => UserField::Name,
        };
        self.analyzer.value_expression(field, value)
    }
}
