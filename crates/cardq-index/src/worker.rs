//! Background suggestion thread.
//!
//! The editor sends a [`SearchState`] on every change. The worker always
//! computes on the newest state it has, skips states identical to the last
//! published one, and drops a result if a newer state arrived while it was
//! being computed.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::debug;

use crate::suggest::{IntellisenseSuggest, Suggester};

/// Query text, caret, and language as seen by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Full query text.
    pub text: String,
    /// Caret byte offset.
    pub caret: usize,
    /// UI language.
    pub language: String,
}

impl SearchState {
    /// Creates a state snapshot.
    pub fn new(text: impl Into<String>, caret: usize, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            caret,
            language: language.into(),
        }
    }
}

/// Handle to a running suggestion thread.
pub struct SuggestWorker {
    /// State updates; dropped to stop the thread.
    sender: Option<Sender<SearchState>>,
    /// Stop request checked before publishing.
    stopped: Arc<AtomicBool>,
    /// Thread handle.
    handle: Option<JoinHandle<()>>,
}

impl SuggestWorker {
    /// Starts the thread. `on_suggest` receives every published result.
    pub fn spawn<F>(suggester: Arc<Suggester>, max_count: usize, on_suggest: F) -> Self
    where
        F: FnMut(&SearchState, IntellisenseSuggest) + Send + 'static,
    {
        let (sender, receiver) = unbounded();
        let stopped = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stopped);
        let handle = thread::spawn(move || {
            run(&suggester, max_count, &receiver, &flag, on_suggest);
        });
        Self {
            sender: Some(sender),
            stopped,
            handle: Some(handle),
        }
    }

    /// Queues a new editor state.
    pub fn update(&self, state: SearchState) {
        if let Some(sender) = &self.sender
            && sender.send(state).is_err()
        {
            debug!("suggest worker already stopped");
        }
    }

    /// Stops the thread and waits for it. An in-flight result is discarded.
    pub fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.sender = None;
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            debug!("suggest worker panicked");
        }
    }
}

impl Drop for SuggestWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Worker loop.
fn run<F>(
    suggester: &Suggester,
    max_count: usize,
    receiver: &Receiver<SearchState>,
    stopped: &AtomicBool,
    mut on_suggest: F,
) where
    F: FnMut(&SearchState, IntellisenseSuggest),
{
    let mut last: Option<SearchState> = None;
    while let Ok(mut state) = receiver.recv() {
        while let Ok(newer) = receiver.try_recv() {
            state = newer;
        }
        if last.as_ref() == Some(&state) {
            continue;
        }

        let suggest = suggester.suggest(&state.text, state.caret, &state.language, max_count);

        if stopped.load(Ordering::SeqCst) {
            break;
        }
        if !receiver.is_empty() {
            continue;
        }
        on_suggest(&state, suggest);
        last = Some(state);
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use cardq_card::CardRepository;
    use crossbeam_channel::bounded;

    use super::*;
    use crate::slot::IndexSlot;

    fn suggester() -> Arc<Suggester> {
        Arc::new(Suggester::new(
            Arc::new(IndexSlot::new()),
            Arc::new(CardRepository::new(Vec::new()).unwrap()),
        ))
    }

    #[test]
    fn publishes_suggestions_for_latest_state() {
        let (tx, rx) = bounded(16);
        let mut worker = SuggestWorker::spawn(suggester(), 20, move |state, suggest| {
            tx.send((state.text.clone(), suggest.values)).unwrap();
        });

        worker.update(SearchState::new("rari", 4, "en"));
        let (text, values) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(text, "rari");
        assert_eq!(values, vec!["rarity:"]);

        worker.update(SearchState::new("rari", 4, "en"));
        worker.update(SearchState::new("fire AND", 8, "en"));
        let (text, values) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(text, "fire AND");
        assert_eq!(values.len(), 8);

        worker.stop();
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn update_after_stop_is_ignored() {
        let mut worker = SuggestWorker::spawn(suggester(), 20, |_, _| {});
        worker.stop();
        worker.update(SearchState::new("x", 1, "en"));
    }
}
