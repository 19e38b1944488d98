//! In-memory card database.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fs,
    path::Path,
};

use serde::Deserialize;

use crate::{
    card::{Card, Localization, Set},
    error::CardError,
};

/// Translations keyed by card id, then by language code.
pub type LocalizationMap = HashMap<String, BTreeMap<String, Localization>>;

/// On-disk layout of a card dump.
#[derive(Deserialize)]
struct Dump {
    /// All sets with their cards.
    sets: Vec<Set>,
    /// Whether translations are already embedded in the cards.
    #[serde(default)]
    localized: bool,
}

/// All sets and cards known to the application.
#[derive(Debug, Clone, Default)]
pub struct CardRepository {
    /// Sets in dump order.
    sets: Vec<Set>,
    /// True once translations for every card are available.
    localizations_loaded: bool,
}

impl CardRepository {
    /// Builds a repository from sets, linking each card to its set.
    ///
    /// Translations count as not loaded until [`Self::fill_localizations`] or
    /// [`Self::mark_localizations_loaded`] is called.
    pub fn new(mut sets: Vec<Set>) -> Result<Self, CardError> {
        let mut seen = HashSet::new();
        for set in &mut sets {
            if !seen.insert(set.code.clone()) {
                return Err(CardError::DuplicateSet {
                    code: set.code.clone(),
                });
            }
            for card in &mut set.cards {
                card.set_code.clone_from(&set.code);
                card.set_name.clone_from(&set.name);
            }
        }
        Ok(Self {
            sets,
            localizations_loaded: false,
        })
    }

    /// Parses a JSON dump.
    pub fn from_json(json: &str, path: &Path) -> Result<Self, CardError> {
        let dump: Dump = serde_json::from_str(json).map_err(|source| CardError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let mut repository = Self::new(dump.sets)?;
        repository.localizations_loaded = dump.localized;
        Ok(repository)
    }

    /// Reads and parses a JSON dump from disk.
    pub fn load_file(path: &Path) -> Result<Self, CardError> {
        let json = fs::read_to_string(path).map_err(|source| CardError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, path)
    }

    /// Reads a translation file and merges it into the cards.
    pub fn load_localizations(&mut self, path: &Path) -> Result<(), CardError> {
        let json = fs::read_to_string(path).map_err(|source| CardError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let translations: LocalizationMap =
            serde_json::from_str(&json).map_err(|source| CardError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        self.fill_localizations(translations);
        Ok(())
    }

    /// Merges translations into the cards and marks them loaded.
    pub fn fill_localizations(&mut self, mut translations: LocalizationMap) {
        for card in self.sets.iter_mut().flat_map(|set| set.cards.iter_mut()) {
            if let Some(languages) = translations.remove(&card.id) {
                card.localizations.extend(languages);
            }
        }
        self.localizations_loaded = true;
    }

    /// Declares the embedded translations complete.
    pub fn mark_localizations_loaded(&mut self) {
        self.localizations_loaded = true;
    }

    /// True once translations are available for every card.
    pub fn is_localization_loaded(&self) -> bool {
        self.localizations_loaded
    }

    /// All sets.
    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    /// Looks up a set by code, ignoring case.
    pub fn set(&self, code: &str) -> Option<&Set> {
        self.sets
            .iter()
            .find(|set| set.code.eq_ignore_ascii_case(code))
    }

    /// Every card of every set.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.sets.iter().flat_map(|set| set.cards.iter())
    }

    /// Number of cards across all sets.
    pub fn card_count(&self) -> usize {
        self.sets.iter().map(|set| set.cards.len()).sum()
    }

    /// Languages that appear in any translation, English first.
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self
            .cards()
            .flat_map(|card| card.localizations.keys().cloned())
            .collect::<HashSet<_>>()
            .into_iter()
            .filter(|language| language != "en")
            .collect();
        languages.sort();
        languages.insert(0, "en".to_string());
        languages
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::fixtures::sample_repository;

    #[test]
    fn links_cards_to_sets() {
        let repository = sample_repository();
        let card = repository.cards().next().unwrap();
        assert!(!card.set_code.is_empty());
        assert!(!card.set_name.is_empty());
        assert_eq!(repository.set(&card.set_code.to_lowercase()).unwrap().code, card.set_code);
    }

    #[test]
    fn duplicate_set_codes_rejected() {
        let sets = vec![
            Set {
                code: "A".into(),
                ..Set::default()
            },
            Set {
                code: "A".into(),
                ..Set::default()
            },
        ];
        assert!(matches!(
            CardRepository::new(sets),
            Err(CardError::DuplicateSet { code }) if code == "A"
        ));
    }

    #[test]
    fn dump_flag_controls_localization_state() {
        let path = PathBuf::from("cards.json");
        let plain = CardRepository::from_json(r#"{"sets":[]}"#, &path).unwrap();
        assert!(!plain.is_localization_loaded());
        let localized = CardRepository::from_json(r#"{"sets":[],"localized":true}"#, &path).unwrap();
        assert!(localized.is_localization_loaded());
    }

    #[test]
    fn parse_error_names_file() {
        let err = CardRepository::from_json("{", Path::new("broken.json")).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn load_and_fill_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let cards = dir.path().join("cards.json");
        fs::write(
            &cards,
            r#"{"sets":[{"code":"T1","name":"Test","cards":[{"id":"c1","name":"Shock"}]}]}"#,
        )
        .unwrap();
        let translations = dir.path().join("ru.json");
        fs::write(&translations, r#"{"c1":{"ru":{"name":"Шок"}}}"#).unwrap();

        let mut repository = CardRepository::load_file(&cards).unwrap();
        assert!(!repository.is_localization_loaded());
        repository.load_localizations(&translations).unwrap();
        assert!(repository.is_localization_loaded());
        assert_eq!(repository.cards().next().unwrap().name_in("ru"), Some("Шок"));
        assert_eq!(repository.languages(), vec!["en", "ru"]);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = CardRepository::load_file(Path::new("/nonexistent/cards.json")).unwrap_err();
        assert!(matches!(err, CardError::ReadFile { .. }));
    }
}
