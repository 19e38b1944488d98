//! Spellchecker word index.
//!
//! Every distinct word of the spellchecked fields is one document. Lookups
//! run a Levenshtein prefix automaton over the field's term dictionary, rank
//! the accepted words by similarity, and map them back to display text.

mod fuzzy;

use std::path::Path;

use tantivy::{
    Index, IndexReader, Searcher, TantivyDocument, Term,
    collector::TopDocs,
    query::TermQuery,
    schema::{Field, IndexRecordOption, Value},
};

use self::fuzzy::{LevenshteinDfa, PrefixAutomata};
use crate::{
    analyzer::CardAnalyzer,
    distance::most_similar,
    error::IndexError,
    fields::UserField,
    schema::WordSchema,
    terms::{matching_terms, text_terms},
    writer::open_index,
};

/// A loaded spellchecker index.
pub struct WordIndex {
    /// Reader over the word index.
    reader: IndexReader,
    /// Field handles.
    schema: WordSchema,
    /// Normalizes typed words.
    analyzer: CardAnalyzer,
    /// Fuzzy automata.
    automata: PrefixAutomata,
}

impl WordIndex {
    /// Opens the word index stored at `path`.
    pub fn open(path: &Path, fuzzy_distance: u8) -> Result<Self, IndexError> {
        let schema = WordSchema::new();
        let index: Index = open_index(path, schema.schema())?;
        let reader = index
            .reader()
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        Ok(Self {
            reader,
            schema,
            analyzer: CardAnalyzer::new(),
            automata: PrefixAutomata::new(fuzzy_distance),
        })
    }

    /// Number of words indexed.
    pub fn num_words(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Words of `field` close to `value`, most similar first.
    ///
    /// Fields without a spellchecker entry yield nothing.
    pub fn suggest_similar(
        &self,
        field: UserField,
        language: &str,
        value: &str,
        max_count: usize,
    ) -> Result<Vec<String>, IndexError> {
        let Some(handle) = self.schema.field(field, language) else {
            return Ok(Vec::new());
        };
        let word = self.analyzer.normalize_word(field, value);
        if word.is_empty() {
            return self.words(field, language, max_count);
        }

        let Some(builder) = self.automata.builder_for(&word) else {
            return Ok(Vec::new());
        };
        let searcher = self.reader.searcher();
        let matches = matching_terms(&searcher, handle, || {
            LevenshteinDfa(builder.build_prefix_dfa(&word))
        })?;
        let ranked = most_similar(matches, &word, max_count);
        self.display_all(&searcher, handle, ranked)
    }

    /// The first `max_count` words of `field` in alphabetical order.
    pub fn words(
        &self,
        field: UserField,
        language: &str,
        max_count: usize,
    ) -> Result<Vec<String>, IndexError> {
        let Some(handle) = self.schema.field(field, language) else {
            return Ok(Vec::new());
        };
        let searcher = self.reader.searcher();
        let ranked = most_similar(text_terms(&searcher, handle)?, "", max_count);
        self.display_all(&searcher, handle, ranked)
    }

    /// Maps indexed words to their display text.
    fn display_all(
        &self,
        searcher: &Searcher,
        field: Field,
        words: Vec<String>,
    ) -> Result<Vec<String>, IndexError> {
        words
            .into_iter()
            .map(|word| self.display(searcher, field, word))
            .collect()
    }

    /// Display text stored with `word`, or the word itself.
    fn display(&self, searcher: &Searcher, field: Field, word: String) -> Result<String, IndexError> {
        let query = TermQuery::new(Term::from_field_text(field, &word), IndexRecordOption::Basic);
        let hits = searcher
            .search(&query, &TopDocs::with_limit(1))
            .map_err(|e| IndexError::read(&e))?;
        let Some((_, address)) = hits.first() else {
            return Ok(word);
        };
        let doc: TantivyDocument = searcher.doc(*address).map_err(|e| IndexError::read(&e))?;
        Ok(doc
            .get_first(self.schema.display)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or(word))
    }
}

#[cfg(test)]
mod test {
    use cardq_card::fixtures;
    use tempfile::TempDir;

    use super::*;
    use crate::{
        indexer::Indexer,
        progress::{CancellationToken, IndexKind, SilentReporter},
        version::IndexVersion,
        writer::DEFAULT_HEAP_SIZE,
    };

    fn build(temp: &TempDir) -> WordIndex {
        let repo = fixtures::sample_repository();
        let version = IndexVersion::new(temp.path(), "words", "1");
        Indexer::new(&repo, DEFAULT_HEAP_SIZE, CancellationToken::new())
            .build(IndexKind::Spellchecker, &version, &mut SilentReporter)
            .unwrap();
        WordIndex::open(&version.directory, 2).unwrap()
    }

    #[test]
    fn suggests_whole_names_with_display_case() {
        let temp = TempDir::new().unwrap();
        let words = build(&temp);

        let names = words.suggest_similar(UserField::Name, "en", "shivan", 5).unwrap();
        assert_eq!(names.first().map(String::as_str), Some("Shivan Dragon"));
    }

    #[test]
    fn tolerates_typos() {
        let temp = TempDir::new().unwrap();
        let words = build(&temp);

        let names = words.suggest_similar(UserField::Name, "en", "fierball", 5).unwrap();
        assert!(names.contains(&"Fireball".to_string()), "{names:?}");
    }

    #[test]
    fn suggests_localized_names() {
        let temp = TempDir::new().unwrap();
        let words = build(&temp);

        let names = words.suggest_similar(UserField::Name, "ru", "молн", 5).unwrap();
        assert_eq!(names, vec!["Молния"]);
    }

    #[test]
    fn suggests_analyzed_words() {
        let temp = TempDir::new().unwrap();
        let words = build(&temp);

        let types = words.suggest_similar(UserField::Type, "en", "crea", 5).unwrap();
        assert!(types.contains(&"creature".to_string()), "{types:?}");
    }

    #[test]
    fn lists_words_alphabetically() {
        let temp = TempDir::new().unwrap();
        let words = build(&temp);

        let all = words.words(UserField::Type, "en", 100).unwrap();
        assert!(all.windows(2).all(|w| w[0] <= w[1]));
        assert!(all.contains(&"instant".to_string()));
        assert!(words.num_words() > 0);
        assert!(words.words(UserField::Rarity, "en", 10).unwrap().is_empty());
    }
}
