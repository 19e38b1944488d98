//! Conversion of cards into index documents.

use std::collections::HashSet;

use cardq_card::Card;
use tantivy::{TantivyDocument, schema::Field};

use crate::{
    adapter::{CardDocumentAdapter, NumericValue},
    analyzer::CardAnalyzer,
    fields::UserField,
    schema::{CardSchema, WordSchema},
};

/// Builds the document index entry for a card.
pub fn card_document(
    schema: &CardSchema,
    adapter: &CardDocumentAdapter,
    card: &Card,
) -> TantivyDocument {
    let mut doc = TantivyDocument::new();
    doc.add_text(schema.id, &card.id);

    for &field in UserField::ALL {
        if field.metadata().is_numeric {
            let (Some(handle), Some(value)) =
                (schema.field(field, "en"), adapter.numeric_value(card, field))
            else {
                continue;
            };
            match value {
                NumericValue::Float(v) => doc.add_f64(handle, v),
                NumericValue::Int(v) => doc.add_i64(handle, v),
            }
            continue;
        }

        for language in field.languages() {
            let Some(handle) = schema.field(field, language) else {
                continue;
            };
            for value in adapter.values(card, field, language) {
                doc.add_text(handle, &value);
            }
        }
    }
    doc
}

/// A spellchecker entry: the normalized word and how to display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    /// Word index field.
    pub field: Field,
    /// Normalized word, the indexed term.
    pub word: String,
    /// Text shown to users.
    pub display: String,
}

impl WordEntry {
    /// Builds the word index document.
    pub fn to_document(&self, schema: &WordSchema) -> TantivyDocument {
        let mut doc = TantivyDocument::new();
        doc.add_text(self.field, &self.word);
        doc.add_text(schema.display, &self.display);
        doc
    }
}

/// Collects distinct spellchecker words across cards.
#[derive(Debug, Default)]
pub struct WordCollector {
    /// Words already emitted, per field.
    seen: HashSet<(Field, String)>,
}

impl WordCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Words of `card` not yet seen on earlier cards.
    ///
    /// Whole-value fields display the value as written. Other fields display
    /// the normalized term.
    pub fn collect(
        &mut self,
        schema: &WordSchema,
        adapter: &CardDocumentAdapter,
        analyzer: &CardAnalyzer,
        card: &Card,
    ) -> Vec<WordEntry> {
        let mut entries = Vec::new();
        for field in UserField::ALL.iter().copied().filter(|f| f.is_spellchecked()) {
            for language in field.languages() {
                let Some(handle) = schema.field(field, language) else {
                    continue;
                };
                for value in adapter.values(card, field, language) {
                    for term in analyzer.words(field, &value) {
                        if !self.seen.insert((handle, term.term.clone())) {
                            continue;
                        }
                        let display = if field.spellchecks_whole_value() {
                            value[term.offset..term.end].to_string()
                        } else {
                            term.term.clone()
                        };
                        entries.push(WordEntry {
                            field: handle,
                            word: term.term,
                            display,
                        });
                    }
                }
            }
        }
        entries
    }

    /// Number of distinct words collected.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// True when nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod test {
    use cardq_card::fixtures;
    use tantivy::schema::Value;

    use super::*;

    fn card(name: &str) -> Card {
        fixtures::sample_repository()
            .cards()
            .find(|c| c.name == name)
            .cloned()
            .unwrap()
    }

    #[test]
    fn card_document_has_localized_and_numeric_values() {
        let schema = CardSchema::new();
        let adapter = CardDocumentAdapter::new();
        let doc = card_document(&schema, &adapter, &card("Grizzly Bears"));

        let name_ru = schema.field(UserField::Name, "ru").unwrap();
        let names: Vec<_> = doc
            .get_all(name_ru)
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["Медведи-гризли"]);

        let power = schema.field(UserField::Power, "en").unwrap();
        let powers: Vec<_> = doc.get_all(power).filter_map(|v| v.as_f64()).collect();
        assert_eq!(powers, vec![2.0]);

        let name_de = schema.field(UserField::Name, "de").unwrap();
        assert_eq!(doc.get_all(name_de).count(), 0);
    }

    #[test]
    fn collector_skips_repeated_words() {
        let schema = WordSchema::new();
        let adapter = CardDocumentAdapter::new();
        let analyzer = CardAnalyzer::new();
        let mut collector = WordCollector::new();

        let dragon = collector.collect(&schema, &adapter, &analyzer, &card("Shivan Dragon"));
        let name_en = schema.field(UserField::Name, "en").unwrap();
        let name = dragon.iter().find(|e| e.field == name_en).unwrap();
        assert_eq!(name.word, "shivan dragon");
        assert_eq!(name.display, "Shivan Dragon");

        let type_en = schema.field(UserField::Type, "en").unwrap();
        assert!(dragon.iter().any(|e| e.field == type_en && e.word == "creature"));

        let bears = collector.collect(&schema, &adapter, &analyzer, &card("Grizzly Bears"));
        assert!(!bears.iter().any(|e| e.field == type_en && e.word == "creature"));
        assert!(bears.iter().any(|e| e.field == type_en && e.word == "bear"));
        assert!(!collector.is_empty());
    }
}
