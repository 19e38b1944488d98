//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use cardq_card::LANGUAGES;

use crate::Config;

/// Largest spellchecker edit distance worth configuring.
const MAX_FUZZY_DISTANCE: u8 = 4;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `max_count` is zero, so nothing would ever be suggested.
    ZeroMaxCount,
    /// The default language is not one cards are translated into.
    UnknownLanguage {
        /// The configured language code.
        language: String,
    },
    /// The edit distance is beyond what the spellchecker supports well.
    FuzzyDistanceTooLarge {
        /// The configured distance.
        distance: u8,
    },
    /// The card dump path does not exist.
    CardsPathMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// No card dump is configured.
    NoCardsConfigured,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxCount => write!(f, "suggest.max_count is 0; no values will be suggested"),
            Self::UnknownLanguage { language } => {
                write!(f, "unknown language '{language}'; English will be used")
            }
            Self::FuzzyDistanceTooLarge { distance } => write!(
                f,
                "suggest.fuzzy_distance {distance} exceeds {MAX_FUZZY_DISTANCE}; it will be capped"
            ),
            Self::CardsPathMissing { path } => write!(f, "card data file does not exist: {path}"),
            Self::NoCardsConfigured => write!(f, "no card data file is configured ([cards] path)"),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.suggest.max_count == 0 {
        warnings.push(ConfigWarning::ZeroMaxCount);
    }
    if !LANGUAGES.contains(&config.suggest.language.as_str()) {
        warnings.push(ConfigWarning::UnknownLanguage {
            language: config.suggest.language.clone(),
        });
    }
    if config.suggest.fuzzy_distance > MAX_FUZZY_DISTANCE {
        warnings.push(ConfigWarning::FuzzyDistanceTooLarge {
            distance: config.suggest.fuzzy_distance,
        });
    }
    match &config.cards.path {
        None => warnings.push(ConfigWarning::NoCardsConfigured),
        Some(path) if !path.is_file() => warnings.push(ConfigWarning::CardsPathMissing {
            path: path.display().to_string(),
        }),
        Some(_) => {}
    }

    warnings
}

/// Clamps a configured edit distance into the supported range.
pub fn effective_fuzzy_distance(distance: u8) -> u8 {
    distance.min(MAX_FUZZY_DISTANCE)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_defaults_only_miss_cards() {
        let warnings = validate_config(&Config::default());
        assert_eq!(warnings, vec![ConfigWarning::NoCardsConfigured]);
    }

    #[test]
    fn test_bad_values_reported() {
        let mut config = Config::default();
        config.suggest.max_count = 0;
        config.suggest.language = "xx".into();
        config.suggest.fuzzy_distance = 9;
        config.cards.path = Some(PathBuf::from("/nonexistent/cards.json"));
        let warnings = validate_config(&config);
        assert_eq!(warnings.len(), 4);
        assert!(warnings.contains(&ConfigWarning::ZeroMaxCount));
        assert!(warnings.contains(&ConfigWarning::FuzzyDistanceTooLarge { distance: 9 }));
        assert!(warnings[1].to_string().contains("'xx'"));
    }

    #[test]
    fn test_fuzzy_distance_capped() {
        assert_eq!(effective_fuzzy_distance(2), 2);
        assert_eq!(effective_fuzzy_distance(10), 4);
    }
}
