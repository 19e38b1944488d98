//! Card search indexes, spellchecking, and query suggestions for cardq.
//!
//! This crate turns a [`cardq_card::CardRepository`] into two Tantivy indexes
//! and answers completion requests against them:
//! - a document index with one field per card field and language
//! - a spellchecker word index for fuzzy value lookups
//! - version markers that trigger a rebuild when the layout changes
//! - a [`Suggester`] offering field names, field values, and operators for the
//!   token under the caret
//! - a [`SuggestWorker`] that recomputes suggestions off the editor thread
//!
//! # Example
//!
//! ```no_run
//! use std::{path::Path, sync::Arc};
//!
//! use cardq_card::CardRepository;
//! use cardq_index::{CardIndex, IndexOptions, SilentReporter};
//!
//! let mut repository = CardRepository::load_file(Path::new("cards.json")).unwrap();
//! repository.mark_localizations_loaded();
//!
//! let index = CardIndex::new(Arc::new(repository), IndexOptions::new(".cardq/index"));
//! index.load_index(&mut SilentReporter).unwrap();
//!
//! let suggest = index.suggester().suggest("rarity:my", 9, "en", 20);
//! for (value, token_type) in suggest.iter() {
//!     println!("{value} ({token_type:?})");
//! }
//! ```

#![warn(missing_docs)]

mod adapter;
mod analyzer;
mod card_index;
mod distance;
mod document;
mod error;
mod fields;
mod indexer;
mod progress;
mod schema;
mod slot;
mod spellchecker;
mod suggest;
mod terms;
mod values;
mod version;
mod worker;
mod writer;

pub use adapter::{CardDocumentAdapter, FieldRef, NumericValue};
pub use analyzer::{AnalyzedTerm, CARD_TOKENIZER, CardAnalyzer, KEYWORD_TOKENIZER};
pub use card_index::{
    CardIndex, DEFAULT_FUZZY_DISTANCE, DOCUMENT_INDEX_VERSION, IndexOptions, WORD_INDEX_VERSION,
};
pub use distance::{distance, most_similar, prefix_distance, similarity};
pub use error::IndexError;
pub use fields::{ANY_FIELD, FieldMetadata, LIKE_FIELD, UserField, ValueKind, resolve_language};
pub use indexer::{Indexer, SetFilter};
pub use progress::{
    BuildStats, CancellationToken, IndexKind, IndexPhase, ProgressReporter, SilentReporter,
};
pub use suggest::{BOOLEAN_OPERATORS, DEFAULT_MAX_COUNT, IntellisenseSuggest, Suggester};
pub use version::{IndexVersion, VersionStatus};
pub use worker::{SearchState, SuggestWorker};
pub use writer::DEFAULT_HEAP_SIZE;
