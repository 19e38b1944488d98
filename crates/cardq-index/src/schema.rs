//! Tantivy schemas for the card document index and the spellchecker word index.
//!
//! The document index holds one field per physical card field: localized
//! fields appear once per language (`name_en`, `name_ru`, ...), everything
//! else once. The word index holds one field per spellchecked physical field
//! plus a stored `display` field with the word as it was written.

use std::collections::HashMap;

use tantivy::schema::{
    Field, IndexRecordOption, NumericOptions, STORED, STRING, Schema, TextFieldIndexing,
    TextOptions,
};

use crate::{
    analyzer::{CARD_TOKENIZER, KEYWORD_TOKENIZER},
    fields::{UserField, ValueKind},
};

/// Field names mapped to handles.
#[derive(Debug, Clone, Default)]
struct FieldMap {
    /// Physical field name to handle.
    fields: HashMap<String, Field>,
}

impl FieldMap {
    /// Records a field handle.
    fn insert(&mut self, name: String, field: Field) {
        self.fields.insert(name, field);
    }

    /// Looks up a field handle.
    fn get(&self, name: &str) -> Option<Field> {
        self.fields.get(name).copied()
    }
}

/// Options for a text field analyzed with `tokenizer`.
fn text_options(tokenizer: &str, record: IndexRecordOption) -> TextOptions {
    TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(tokenizer)
            .set_index_option(record),
    )
}

/// Handles to all fields of the card document index.
#[derive(Debug, Clone)]
pub struct CardSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Card identifier.
    pub id: Field,
    /// Physical card fields.
    fields: FieldMap,
}

impl CardSchema {
    /// Creates the schema with every physical field.
    pub fn new() -> Self {
        let mut builder = Schema::builder();
        let id = builder.add_text_field("id", STRING | STORED);
        let mut fields = FieldMap::default();

        for field in UserField::ALL {
            for language in field.languages() {
                let name = field.physical_name(language);
                let handle = match field.kind() {
                    ValueKind::Text => builder.add_text_field(
                        &name,
                        text_options(CARD_TOKENIZER, IndexRecordOption::WithFreqsAndPositions),
                    ),
                    ValueKind::Keyword
                    | ValueKind::Limited
                    | ValueKind::Combinatoric
                    | ValueKind::Legality => builder.add_text_field(
                        &name,
                        text_options(KEYWORD_TOKENIZER, IndexRecordOption::Basic),
                    ),
                    ValueKind::Float => builder.add_f64_field(&name, numeric_options()),
                    ValueKind::Int => builder.add_i64_field(&name, numeric_options()),
                };
                fields.insert(name, handle);
            }
        }

        Self {
            schema: builder.build(),
            id,
            fields,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Handle of `field` for `language`.
    pub fn field(&self, field: UserField, language: &str) -> Option<Field> {
        self.fields.get(&field.physical_name(language))
    }
}

impl Default for CardSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Numeric fields are indexed for term scans and fast for sorting.
fn numeric_options() -> NumericOptions {
    NumericOptions::default()
        .set_indexed()
        .set_fast()
        .set_stored()
}

/// Handles to all fields of the spellchecker word index.
#[derive(Debug, Clone)]
pub struct WordSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// The word as it appears in the card, for display.
    pub display: Field,
    /// Spellchecked physical fields.
    fields: FieldMap,
}

impl WordSchema {
    /// Creates the schema with every spellchecked physical field.
    pub fn new() -> Self {
        let mut builder = Schema::builder();
        let display = builder.add_text_field("display", STORED);
        let mut fields = FieldMap::default();

        for field in UserField::ALL.iter().filter(|f| f.is_spellchecked()) {
            for language in field.languages() {
                let name = field.physical_name(language);
                let handle = builder.add_text_field(
                    &name,
                    text_options(KEYWORD_TOKENIZER, IndexRecordOption::Basic),
                );
                fields.insert(name, handle);
            }
        }

        Self {
            schema: builder.build(),
            display,
            fields,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Handle of the word field for `field` in `language`.
    pub fn field(&self, field: UserField, language: &str) -> Option<Field> {
        self.fields.get(&field.physical_name(language))
    }
}

impl Default for WordSchema {
    fn default() -> Self {
        Self::new()
    }
}
