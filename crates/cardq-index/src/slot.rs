//! The loaded index generation shared by the loader and suggesters.
//!
//! Readers take an `Arc` to the current generation and keep using it for the
//! whole request. A rebuild opens a complete new generation and swaps the
//! pointer, so a reader sees either the old indexes or the new ones.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex, RwLock};
use tantivy::IndexReader;

use crate::{progress::IndexPhase, schema::CardSchema, spellchecker::WordIndex};

/// One consistent pair of loaded indexes.
pub struct Generation {
    /// Reader over the document index.
    pub documents: IndexReader,
    /// Document index field handles.
    pub schema: CardSchema,
    /// Spellchecker index.
    pub words: WordIndex,
}

/// Current generation and load phase.
pub struct IndexSlot {
    /// Latest loaded generation.
    generation: RwLock<Option<Arc<Generation>>>,
    /// Load progress.
    phase: Mutex<IndexPhase>,
    /// Signalled when the phase leaves the busy states.
    idle: Condvar,
}

impl IndexSlot {
    /// An empty slot that was never loaded.
    pub fn new() -> Self {
        Self {
            generation: RwLock::new(None),
            phase: Mutex::new(IndexPhase::NotLoaded),
            idle: Condvar::new(),
        }
    }

    /// The generation readers should use.
    pub fn current(&self) -> Option<Arc<Generation>> {
        self.generation.read().clone()
    }

    /// Publishes a fully opened generation.
    pub fn swap(&self, generation: Generation) {
        *self.generation.write() = Some(Arc::new(generation));
    }

    /// Current phase.
    pub fn phase(&self) -> IndexPhase {
        self.phase.lock().clone()
    }

    /// Replaces the phase.
    pub fn set_phase(&self, phase: IndexPhase) {
        let busy = phase.is_busy();
        *self.phase.lock() = phase;
        if !busy {
            self.idle.notify_all();
        }
    }

    /// Blocks until no load is running.
    pub fn wait_idle(&self) {
        let mut phase = self.phase.lock();
        while phase.is_busy() {
            self.idle.wait(&mut phase);
        }
    }

    /// Moves to `Checking` unless a load is already running.
    pub fn try_begin(&self) -> bool {
        let mut phase = self.phase.lock();
        if phase.is_busy() {
            return false;
        }
        *phase = IndexPhase::Checking;
        true
    }
}

#[cfg(test)]
mod test {
    use std::thread;

    use super::*;

    #[test]
    fn wait_idle_returns_once_load_ends() {
        let slot = Arc::new(IndexSlot::new());
        assert!(slot.try_begin());
        assert!(!slot.try_begin());

        let finisher = Arc::clone(&slot);
        let handle = thread::spawn(move || finisher.set_phase(IndexPhase::Loaded));
        slot.wait_idle();
        handle.join().unwrap();

        assert_eq!(slot.phase(), IndexPhase::Loaded);
        assert!(slot.current().is_none());
    }
}
