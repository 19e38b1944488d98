//! Builds the document and spellchecker indexes from a card repository.
//!
//! Each build writes into the index's staging directory and is promoted only
//! after a successful commit. Cancellation is checked before every card and
//! every set; an aborted or failed build removes its staging directory, so
//! the on-disk state looks as if the build never started.

use std::{path::Path, sync::Arc};

use cardq_card::{CardRepository, Set};
use tracing::{debug, info, warn};

use crate::{
    adapter::CardDocumentAdapter,
    analyzer::CardAnalyzer,
    document::{WordCollector, card_document},
    error::IndexError,
    progress::{BuildStats, CancellationToken, IndexKind, ProgressReporter},
    schema::{CardSchema, WordSchema},
    version::IndexVersion,
    writer::IndexWriter,
};

/// Predicate restricting which sets are indexed.
pub type SetFilter = Arc<dyn Fn(&Set) -> bool + Send + Sync>;

/// Writes card indexes.
pub struct Indexer<'a> {
    /// Source cards.
    repository: &'a CardRepository,
    /// Field access.
    adapter: CardDocumentAdapter,
    /// Word extraction.
    analyzer: CardAnalyzer,
    /// Writer heap in bytes.
    heap_size: usize,
    /// Sets to include; all when absent.
    filter_set: Option<SetFilter>,
    /// Stop request.
    cancel: CancellationToken,
}

impl<'a> Indexer<'a> {
    /// Creates an indexer over `repository`.
    pub fn new(repository: &'a CardRepository, heap_size: usize, cancel: CancellationToken) -> Self {
        Self {
            repository,
            adapter: CardDocumentAdapter::new(),
            analyzer: CardAnalyzer::new(),
            heap_size,
            filter_set: None,
            cancel,
        }
    }

    /// Restricts the build to sets accepted by `filter`.
    pub fn with_set_filter(mut self, filter: Option<SetFilter>) -> Self {
        self.filter_set = filter;
        self
    }

    /// Builds one index into staging and promotes it.
    pub fn build<R: ProgressReporter + ?Sized>(
        &self,
        kind: IndexKind,
        version: &IndexVersion,
        reporter: &mut R,
    ) -> Result<BuildStats, IndexError> {
        if !self.repository.is_localization_loaded() {
            return Err(IndexError::LocalizationsNotLoaded);
        }

        let staging = version.prepare_staging()?;
        info!(%kind, path = %staging.display(), tag = %version.tag, "building index");

        let result = match kind {
            IndexKind::Documents => self.write_documents(&staging, reporter),
            IndexKind::Spellchecker => self.write_words(&staging, reporter),
        };

        let stats = match result {
            Ok(stats) => stats,
            Err(e) => {
                if let Err(cleanup) = version.discard_staging() {
                    warn!(error = %cleanup, "failed to remove staging directory");
                }
                match &e {
                    IndexError::Aborted => info!(%kind, "index build aborted"),
                    other => warn!(%kind, error = %other, "index build failed"),
                }
                return Err(e);
            }
        };

        version.promote()?;
        info!(
            %kind,
            sets = stats.sets_indexed,
            cards = stats.cards_indexed,
            documents = stats.documents,
            "index built"
        );
        reporter.on_complete(&stats);
        Ok(stats)
    }

    /// Sets selected for indexing.
    fn selected_sets(&self) -> Vec<&'a Set> {
        self.repository
            .sets()
            .iter()
            .filter(|set| self.filter_set.as_ref().is_none_or(|f| f(set)))
            .collect()
    }

    /// Fails with `Aborted` once cancellation was requested.
    fn check_cancelled(&self) -> Result<(), IndexError> {
        if self.cancel.is_cancelled() {
            return Err(IndexError::Aborted);
        }
        Ok(())
    }

    /// Writes one document per card.
    fn write_documents<R: ProgressReporter + ?Sized>(
        &self,
        path: &Path,
        reporter: &mut R,
    ) -> Result<BuildStats, IndexError> {
        let schema = CardSchema::new();
        let mut writer = IndexWriter::open(path, schema.schema(), self.heap_size)?;
        let mut stats = BuildStats::new(IndexKind::Documents);
        let sets = self.selected_sets();

        for (i, set) in sets.iter().enumerate() {
            self.check_cancelled()?;
            for card in &set.cards {
                self.check_cancelled()?;
                writer.add(card_document(&schema, &self.adapter, card))?;
                stats.cards_indexed += 1;
                stats.documents += 1;
            }
            stats.sets_indexed += 1;
            debug!(set = %set.code, done = i + 1, total = sets.len(), "documents indexed");
            reporter.on_set_indexed(IndexKind::Documents, i + 1, sets.len());
        }

        self.check_cancelled()?;
        reporter.on_saving(IndexKind::Documents);
        writer.commit()?;
        writer.finish()?;
        Ok(stats)
    }

    /// Writes one document per distinct word.
    fn write_words<R: ProgressReporter + ?Sized>(
        &self,
        path: &Path,
        reporter: &mut R,
    ) -> Result<BuildStats, IndexError> {
        let schema = WordSchema::new();
        let mut writer = IndexWriter::open(path, schema.schema(), self.heap_size)?;
        let mut collector = WordCollector::new();
        let mut stats = BuildStats::new(IndexKind::Spellchecker);
        let sets = self.selected_sets();

        for (i, set) in sets.iter().enumerate() {
            self.check_cancelled()?;
            for card in &set.cards {
                self.check_cancelled()?;
                for entry in collector.collect(&schema, &self.adapter, &self.analyzer, card) {
                    writer.add(entry.to_document(&schema))?;
                    stats.documents += 1;
                }
                stats.cards_indexed += 1;
            }
            stats.sets_indexed += 1;
            debug!(set = %set.code, done = i + 1, total = sets.len(), words = collector.len(), "words indexed");
            reporter.on_set_indexed(IndexKind::Spellchecker, i + 1, sets.len());
        }

        self.check_cancelled()?;
        reporter.on_saving(IndexKind::Spellchecker);
        writer.commit()?;
        writer.finish()?;
        Ok(stats)
    }
}
