//! Loading, rebuilding, and hot-swapping the card indexes.
//!
//! [`CardIndex::load_index`] walks the phases
//! `Checking -> Loading -> Loaded` when both indexes carry the expected version
//! tag, and `Checking -> Building -> Saving -> Loading -> Loaded` when either
//! is stale or missing. Only a fully opened pair of indexes is published to
//! suggesters.

use std::{
    path::PathBuf,
    sync::Arc,
    thread::{self, JoinHandle},
};

use cardq_card::{CardRepository, Set};
use cardq_config::{Config, effective_fuzzy_distance};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::{
    error::IndexError,
    indexer::{Indexer, SetFilter},
    progress::{BuildStats, CancellationToken, IndexKind, IndexPhase, ProgressReporter},
    schema::CardSchema,
    slot::{Generation, IndexSlot},
    spellchecker::WordIndex,
    suggest::Suggester,
    version::IndexVersion,
    writer::{DEFAULT_HEAP_SIZE, open_index},
};

/// Version tag of the document index layout.
pub const DOCUMENT_INDEX_VERSION: &str = "0.41";

/// Version tag of the spellchecker index layout.
pub const WORD_INDEX_VERSION: &str = "0.41";

/// Default edit distance for long words.
pub const DEFAULT_FUZZY_DISTANCE: u8 = 2;

/// Where and how indexes are built.
#[derive(Clone)]
pub struct IndexOptions {
    /// Directory holding both indexes.
    pub root: PathBuf,
    /// Writer heap in bytes.
    pub heap_size: usize,
    /// Edit distance for long words in the spellchecker.
    pub fuzzy_distance: u8,
    /// Expected document index tag.
    pub document_tag: String,
    /// Expected spellchecker index tag.
    pub word_tag: String,
    /// Sets to include; all when absent.
    pub filter_set: Option<SetFilter>,
}

impl IndexOptions {
    /// Defaults rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            heap_size: DEFAULT_HEAP_SIZE,
            fuzzy_distance: DEFAULT_FUZZY_DISTANCE,
            document_tag: DOCUMENT_INDEX_VERSION.to_string(),
            word_tag: WORD_INDEX_VERSION.to_string(),
            filter_set: None,
        }
    }

    /// Options from configuration, including the configured set list.
    pub fn from_config(config: &Config) -> Self {
        let mut options = Self::new(config.index_root());
        options.heap_size = config.index.build_heap_size;
        options.fuzzy_distance = effective_fuzzy_distance(config.suggest.fuzzy_distance);
        if !config.cards.sets.is_empty() {
            let codes = config.cards.sets.clone();
            options.filter_set = Some(Arc::new(move |set: &Set| {
                codes.iter().any(|code| code.eq_ignore_ascii_case(&set.code))
            }));
        }
        options
    }

    /// Overrides both expected version tags.
    pub fn with_tags(mut self, document_tag: &str, word_tag: &str) -> Self {
        self.document_tag = document_tag.to_string();
        self.word_tag = word_tag.to_string();
        self
    }

    /// Restricts builds to sets accepted by `filter`.
    pub fn with_set_filter(
        mut self,
        filter: impl Fn(&Set) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter_set = Some(Arc::new(filter));
        self
    }

    /// Version marker of the index of `kind`.
    pub fn version(&self, kind: IndexKind) -> IndexVersion {
        let tag = match kind {
            IndexKind::Documents => &self.document_tag,
            IndexKind::Spellchecker => &self.word_tag,
        };
        IndexVersion::new(&self.root, kind.dir_name(), tag)
    }
}

/// Forwards progress while mirroring it into the shared phase.
struct PhaseReporter<'a, R: ?Sized> {
    /// Phase owner.
    slot: &'a IndexSlot,
    /// Caller's reporter.
    inner: &'a mut R,
}

impl<R: ProgressReporter + ?Sized> ProgressReporter for PhaseReporter<'_, R> {
    fn on_set_indexed(&mut self, kind: IndexKind, done: usize, total: usize) {
        self.slot.set_phase(IndexPhase::Building { kind, done, total });
        self.inner.on_set_indexed(kind, done, total);
    }

    fn on_saving(&mut self, kind: IndexKind) {
        self.slot.set_phase(IndexPhase::Saving { kind });
        self.inner.on_saving(kind);
    }

    fn on_complete(&mut self, stats: &BuildStats) {
        self.inner.on_complete(stats);
    }
}

/// Rebuilds stale indexes, opens both, and publishes them.
fn load_generation<R: ProgressReporter + ?Sized>(
    options: &IndexOptions,
    repository: &CardRepository,
    cancel: &CancellationToken,
    slot: &IndexSlot,
    reporter: &mut R,
) -> Result<(), IndexError> {
    let indexer = Indexer::new(repository, options.heap_size, cancel.clone())
        .with_set_filter(options.filter_set.clone());

    for kind in [IndexKind::Documents, IndexKind::Spellchecker] {
        let version = options.version(kind);
        let status = version.status();
        debug!(%kind, status = status.description(), "checked index version");
        if version.is_up_to_date() {
            continue;
        }
        info!(%kind, expected = %version.tag, found = ?version.stored_tag(), "rebuilding index");
        slot.set_phase(IndexPhase::Building {
            kind,
            done: 0,
            total: 0,
        });
        let mut phased = PhaseReporter {
            slot,
            inner: &mut *reporter,
        };
        indexer.build(kind, &version, &mut phased)?;
    }

    if cancel.is_cancelled() {
        return Err(IndexError::Aborted);
    }

    slot.set_phase(IndexPhase::Loading);
    let generation = open_generation(options)?;
    slot.swap(generation);
    info!(root = %options.root.display(), "indexes loaded");
    Ok(())
}

/// Opens both up-to-date index directories.
fn open_generation(options: &IndexOptions) -> Result<Generation, IndexError> {
    let document_dir = options.version(IndexKind::Documents).directory;
    let schema = CardSchema::new();
    let documents = open_index(&document_dir, schema.schema())?
        .reader()
        .map_err(|e| IndexError::open_index(document_dir.clone(), &e))?;

    let word_dir = options.version(IndexKind::Spellchecker).directory;
    let words = WordIndex::open(&word_dir, options.fuzzy_distance)?;
    debug!(
        documents = documents.searcher().num_docs(),
        words = words.num_words(),
        "opened index generation"
    );

    Ok(Generation {
        documents,
        schema,
        words,
    })
}

/// The card document and spellchecker indexes with their load lifecycle.
pub struct CardIndex {
    /// Build and location settings.
    options: IndexOptions,
    /// Source cards.
    repository: Arc<CardRepository>,
    /// Published generation and phase.
    slot: Arc<IndexSlot>,
    /// Stop request for running builds.
    cancel: CancellationToken,
    /// Background load thread, if one was started.
    loader: Mutex<Option<JoinHandle<Result<(), IndexError>>>>,
}

impl CardIndex {
    /// Creates an index that is not loaded yet.
    pub fn new(repository: Arc<CardRepository>, options: IndexOptions) -> Self {
        Self {
            options,
            repository,
            slot: Arc::new(IndexSlot::new()),
            cancel: CancellationToken::new(),
            loader: Mutex::new(None),
        }
    }

    /// Build and location settings.
    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Token that aborts a running build when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// True when both on-disk indexes carry their expected tags.
    pub fn is_up_to_date(&self) -> bool {
        [IndexKind::Documents, IndexKind::Spellchecker]
            .into_iter()
            .all(|kind| self.options.version(kind).is_up_to_date())
    }

    /// True once a generation has been published.
    pub fn is_loaded(&self) -> bool {
        self.slot.current().is_some()
    }

    /// True while a load or build runs.
    pub fn is_loading(&self) -> bool {
        self.slot.phase().is_busy()
    }

    /// Current phase.
    pub fn phase(&self) -> IndexPhase {
        self.slot.phase()
    }

    /// A suggester reading from this index. Each suggester owns its own
    /// value cache.
    pub fn suggester(&self) -> Suggester {
        Suggester::new(Arc::clone(&self.slot), Arc::clone(&self.repository))
    }

    /// Loads the indexes on the calling thread, rebuilding stale ones.
    pub fn load_index<R: ProgressReporter + ?Sized>(
        &self,
        reporter: &mut R,
    ) -> Result<(), IndexError> {
        if !self.slot.try_begin() {
            return Err(IndexError::Busy);
        }
        let result = load_generation(
            &self.options,
            &self.repository,
            &self.cancel,
            &self.slot,
            reporter,
        );
        finish_phase(&self.slot, &result);
        self.cancel.reset();
        result
    }

    /// Starts loading on a background thread.
    ///
    /// Use [`Self::wait`] to join it or [`Self::abort_loading`] to stop it.
    pub fn load_in_background(
        &self,
        mut reporter: Box<dyn ProgressReporter + Send>,
    ) -> Result<(), IndexError> {
        if !self.slot.try_begin() {
            return Err(IndexError::Busy);
        }
        let options = self.options.clone();
        let repository = Arc::clone(&self.repository);
        let slot = Arc::clone(&self.slot);
        let cancel = self.cancel.clone();

        let handle = thread::spawn(move || {
            let result =
                load_generation(&options, &repository, &cancel, &slot, reporter.as_mut());
            finish_phase(&slot, &result);
            result
        });
        *self.loader.lock() = Some(handle);
        Ok(())
    }

    /// Blocks until a background load finishes and returns its result.
    pub fn wait(&self) -> Result<(), IndexError> {
        let Some(handle) = self.loader.lock().take() else {
            return Ok(());
        };
        handle
            .join()
            .unwrap_or_else(|_| Err(IndexError::Read("index loader panicked".to_string())))
    }

    /// Stops a running load and waits until it has quiesced.
    ///
    /// Covers both a background load and a [`Self::load_index`] call running
    /// on another thread. A partly built index is discarded; the previous
    /// generation, if any, stays published.
    pub fn abort_loading(&self) {
        let handle = self.loader.lock().take();
        if let Some(handle) = handle {
            self.cancel.cancel();
            join_loader(handle);
        } else if self.slot.phase().is_busy() {
            self.cancel.cancel();
            self.slot.wait_idle();
            info!("index loading aborted");
        } else {
            return;
        }
        self.cancel.reset();
    }

    /// Marks both indexes stale so the next load rebuilds them.
    pub fn invalidate_index(&self) -> Result<(), IndexError> {
        for kind in [IndexKind::Documents, IndexKind::Spellchecker] {
            self.options.version(kind).invalidate()?;
        }
        info!(root = %self.options.root.display(), "indexes invalidated");
        Ok(())
    }
}

impl Drop for CardIndex {
    fn drop(&mut self) {
        if let Some(handle) = self.loader.get_mut().take() {
            self.cancel.cancel();
            join_loader(handle);
        }
    }
}

/// Joins a cancelled loader thread and logs how it ended.
fn join_loader(handle: JoinHandle<Result<(), IndexError>>) {
    match handle.join() {
        Ok(Err(IndexError::Aborted)) => info!("index loading aborted"),
        Ok(Err(e)) => warn!(error = %e, "index loading failed during abort"),
        Ok(Ok(())) => {}
        Err(_) => warn!("index loader panicked"),
    }
}

/// Records the outcome of a load in the phase.
fn finish_phase(slot: &IndexSlot, result: &Result<(), IndexError>) {
    match result {
        Ok(()) => slot.set_phase(IndexPhase::Loaded),
        Err(e) => slot.set_phase(IndexPhase::Failed(e.to_string())),
    }
}
