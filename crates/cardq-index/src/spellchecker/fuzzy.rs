//! Levenshtein automata over the word index term dictionary.

use std::collections::HashMap;

use levenshtein_automata::{Distance, LevenshteinAutomatonBuilder, SINK_STATE};
use tantivy_fst::Automaton;

/// Words up to this many characters must match exactly.
const EXACT_MAX_CHARS: usize = 2;

/// Words up to this many characters allow one edit.
const ONE_EDIT_MAX_CHARS: usize = 5;

/// Wrapper that implements `tantivy_fst::Automaton` for `levenshtein_automata::DFA`.
pub(super) struct LevenshteinDfa(pub(super) levenshtein_automata::DFA);

impl Automaton for LevenshteinDfa {
    type State = u32;

    fn start(&self) -> Self::State {
        self.0.initial_state()
    }

    fn is_match(&self, state: &Self::State) -> bool {
        matches!(self.0.distance(*state), Distance::Exact(_))
    }

    fn can_match(&self, state: &Self::State) -> bool {
        *state != SINK_STATE
    }

    fn accept(&self, state: &Self::State, byte: u8) -> Self::State {
        self.0.transition(*state, byte)
    }
}

/// Automaton builders for every edit distance a lookup may use.
pub(super) struct PrefixAutomata {
    /// Builder per edit distance.
    builders: HashMap<u8, LevenshteinAutomatonBuilder>,
    /// Largest distance, used for long words.
    max_distance: u8,
}

impl PrefixAutomata {
    /// Prepares builders for distances 0, 1, and `max_distance`.
    pub(super) fn new(max_distance: u8) -> Self {
        let mut builders = HashMap::new();
        for distance in [0, 1.min(max_distance), max_distance] {
            builders
                .entry(distance)
                .or_insert_with(|| LevenshteinAutomatonBuilder::new(distance, true));
        }
        Self {
            builders,
            max_distance,
        }
    }

    /// Edit distance allowed for a word of `word`'s length.
    pub(super) fn distance_for(&self, word: &str) -> u8 {
        match word.chars().count() {
            n if n <= EXACT_MAX_CHARS => 0,
            n if n <= ONE_EDIT_MAX_CHARS => 1.min(self.max_distance),
            _ => self.max_distance,
        }
    }

    /// Builder for the distance `word` allows.
    pub(super) fn builder_for(&self, word: &str) -> Option<&LevenshteinAutomatonBuilder> {
        self.builders.get(&self.distance_for(word))
    }

    /// Automaton accepting terms that start with something close to `word`.
    #[cfg(test)]
    fn prefix_dfa(&self, word: &str) -> Option<LevenshteinDfa> {
        let builder = self.builder_for(word)?;
        Some(LevenshteinDfa(builder.build_prefix_dfa(word)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn accepts(dfa: &LevenshteinDfa, term: &str) -> bool {
        let state = term
            .bytes()
            .fold(dfa.start(), |state, byte| dfa.accept(&state, byte));
        dfa.is_match(&state)
    }

    #[test]
    fn distance_grows_with_length() {
        let automata = PrefixAutomata::new(2);
        assert_eq!(automata.distance_for("fi"), 0);
        assert_eq!(automata.distance_for("fire"), 1);
        assert_eq!(automata.distance_for("fireball"), 2);

        let strict = PrefixAutomata::new(0);
        assert_eq!(strict.distance_for("fireball"), 0);
    }

    #[test]
    fn prefix_dfa_matches_completions_and_typos() {
        let automata = PrefixAutomata::new(2);
        let dfa = automata.prefix_dfa("fier").unwrap();
        assert!(accepts(&dfa, "fireball"));
        assert!(accepts(&dfa, "fire"));
        assert!(!accepts(&dfa, "bolt"));

        let exact = automata.prefix_dfa("li").unwrap();
        assert!(accepts(&exact, "lightning bolt"));
        assert!(!accepts(&exact, "ki"));
    }
}
