//! Build progress, load phases, and cancellation.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

/// The two on-disk indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// Card document index.
    Documents,
    /// Spellchecker word index.
    Spellchecker,
}

impl IndexKind {
    /// Directory name under the index root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Documents => "cards",
            Self::Spellchecker => "words",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Documents => write!(f, "document index"),
            Self::Spellchecker => write!(f, "spellchecker index"),
        }
    }
}

/// Statistics from building one index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStats {
    /// Which index was built.
    pub kind: IndexKind,
    /// Sets written.
    pub sets_indexed: usize,
    /// Cards read.
    pub cards_indexed: usize,
    /// Documents written.
    pub documents: usize,
}

impl BuildStats {
    /// Empty statistics for `kind`.
    pub fn new(kind: IndexKind) -> Self {
        Self {
            kind,
            sets_indexed: 0,
            cards_indexed: 0,
            documents: 0,
        }
    }
}

/// Callback for reporting build progress.
pub trait ProgressReporter {
    /// Called after each set has been written.
    fn on_set_indexed(&mut self, kind: IndexKind, done: usize, total: usize);

    /// Called before the finished index is committed and promoted.
    fn on_saving(&mut self, _kind: IndexKind) {}

    /// Called when an index build is complete.
    fn on_complete(&mut self, stats: &BuildStats);
}

/// A no-op progress reporter.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn on_set_indexed(&mut self, _kind: IndexKind, _done: usize, _total: usize) {}
    fn on_complete(&mut self, _stats: &BuildStats) {}
}

/// Where a [`crate::CardIndex`] is in its load cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexPhase {
    /// No load attempted.
    NotLoaded,
    /// Comparing version markers.
    Checking,
    /// Opening up-to-date indexes.
    Loading,
    /// Rebuilding a stale index.
    Building {
        /// Index being built.
        kind: IndexKind,
        /// Sets written so far.
        done: usize,
        /// Sets to write.
        total: usize,
    },
    /// Committing and promoting a built index.
    Saving {
        /// Index being saved.
        kind: IndexKind,
    },
    /// Indexes are loaded and searchable.
    Loaded,
    /// The last load failed or was aborted.
    Failed(String),
}

impl IndexPhase {
    /// True while checking, loading, building, or saving.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Checking | Self::Loading | Self::Building { .. } | Self::Saving { .. }
        )
    }
}

impl fmt::Display for IndexPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotLoaded => write!(f, "not loaded"),
            Self::Checking => write!(f, "checking"),
            Self::Loading => write!(f, "loading"),
            Self::Building { kind, done, total } => {
                write!(f, "building {kind} ({done}/{total} sets)")
            }
            Self::Saving { kind } => write!(f, "saving {kind}"),
            Self::Loaded => write!(f, "loaded"),
            Self::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

/// Shared flag that asks a running build to stop.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    /// Set once cancellation is requested.
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// True once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Clears a previous request so the token can be reused.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cancellation_is_shared_between_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
        clone.reset();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn phase_display() {
        let phase = IndexPhase::Building {
            kind: IndexKind::Spellchecker,
            done: 2,
            total: 4,
        };
        assert_eq!(phase.to_string(), "building spellchecker index (2/4 sets)");
        assert!(phase.is_busy());
        assert!(!IndexPhase::Loaded.is_busy());
        assert!(!IndexPhase::Failed("x".into()).is_busy());
    }
}
