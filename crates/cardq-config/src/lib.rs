//! Configuration system for cardq.
//!
//! cardq uses TOML configuration files named `.cardq.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.cardq.toml` files
//! found, then loading `~/.cardq.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawCardsSettings, RawConfig, RawIndexSettings, RawSuggestSettings, parse_config_file,
    parse_config_str,
};
pub use resolve::resolve_config_path;
use serde::{Deserialize, Serialize};
pub use templates::local_template;
pub use validate::{ConfigWarning, effective_fuzzy_distance};
use validate::validate_config;

/// Index directory used next to the closest config file.
pub const DEFAULT_INDEX_DIR: &str = ".cardq/index";

/// Top-level merged configuration for cardq.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Index storage settings.
    pub index: IndexSettings,
    /// Suggestion settings.
    pub suggest: SuggestSettings,
    /// Card data settings.
    pub cards: CardsSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.cardq.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Directory where indexes are stored.
    ///
    /// An explicit `[index] root` wins. Otherwise the index lives in
    /// `.cardq/index` next to the closest config file, or in the platform data
    /// directory when no config file exists.
    pub fn index_root(&self) -> PathBuf {
        if let Some(root) = &self.index.root {
            return root.clone();
        }
        if let Some(config_root) = &self.config_root {
            return config_root.join(DEFAULT_INDEX_DIR);
        }
        ProjectDirs::from("", "", "cardq").map_or_else(
            || PathBuf::from(DEFAULT_INDEX_DIR),
            |dirs| dirs.data_dir().join("index"),
        )
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> Result<String, toml::ser::Error> {
        let serializable = SerializableSettings {
            index: self.index.clone(),
            suggest: self.suggest.clone(),
            cards: self.cards.clone(),
        };
        toml::to_string_pretty(&serializable)
    }
}

/// Index storage settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Explicit index directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Writer heap size in bytes.
    pub build_heap_size: usize,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            root: None,
            build_heap_size: 50_000_000,
        }
    }
}

/// Suggestion settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SuggestSettings {
    /// Maximum number of suggested values.
    pub max_count: usize,
    /// Default language code.
    pub language: String,
    /// Maximum edit distance for spellchecker lookups.
    pub fuzzy_distance: u8,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            max_count: 20,
            language: "en".to_string(),
            fuzzy_distance: 2,
        }
    }
}

/// Card data settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CardsSettings {
    /// Card dump file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Separate translations file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localizations: Option<PathBuf>,
    /// Set codes to index. Empty means all.
    pub sets: Vec<String>,
}

/// Settings in `.cardq.toml` layout, for display.
#[derive(Serialize)]
struct SerializableSettings {
    /// `[index]` section.
    index: IndexSettings,
    /// `[suggest]` section.
    suggest: SuggestSettings,
    /// `[cards]` section.
    cards: CardsSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ProjectTree;

    #[test]
    fn test_index_root_precedence() {
        let mut config = Config {
            config_root: Some(PathBuf::from("/project")),
            ..Config::default()
        };
        assert_eq!(config.index_root(), PathBuf::from("/project/.cardq/index"));
        config.index.root = Some(PathBuf::from("/elsewhere"));
        assert_eq!(config.index_root(), PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_load_resolves_cards_next_to_config() {
        let tree = ProjectTree::new();
        let cards = tree.cards("data/cards.json");
        tree.config("", "[cards]\npath = \"data/cards.json\"\nsets = [\"LEA\"]\n");
        let cwd = tree.dir("decks");

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.cards.path.as_deref(), Some(cards.as_path()));
        assert_eq!(config.cards.sets, vec!["LEA".to_string()]);
        assert_eq!(config.index_root(), tree.path().join(DEFAULT_INDEX_DIR));
        assert!(
            config
                .validate()
                .iter()
                .all(|w| !matches!(w, ConfigWarning::CardsPathMissing { .. }))
        );
    }

    #[test]
    fn test_settings_to_toml_round_trips_values() {
        let mut config = Config::default();
        config.suggest.max_count = 7;
        let toml = config.settings_to_toml().unwrap();
        assert!(toml.contains("[suggest]"));
        assert!(toml.contains("max_count = 7"));
        assert!(toml.contains("build_heap_size = 50000000"));
        let raw = parse_config_str(&toml, Path::new("effective.toml")).unwrap();
        assert_eq!(raw.suggest.unwrap().max_count, Some(7));
    }
}
