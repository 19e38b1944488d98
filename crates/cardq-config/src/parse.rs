//! Configuration file parsing.
//!
//! Parses individual `.cardq.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Index storage section.
    pub index: Option<RawIndexSettings>,
    /// Suggestion section.
    pub suggest: Option<RawSuggestSettings>,
    /// Card data section.
    pub cards: Option<RawCardsSettings>,
}

/// Raw index settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIndexSettings {
    /// Directory holding the document and spellchecker indexes.
    pub root: Option<String>,
    /// Writer heap size in bytes.
    pub build_heap_size: Option<usize>,
}

/// Raw suggestion settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSuggestSettings {
    /// Maximum number of suggested values.
    pub max_count: Option<usize>,
    /// Default language code.
    pub language: Option<String>,
    /// Maximum edit distance for spellchecker lookups.
    pub fuzzy_distance: Option<u8>,
}

/// Raw card data settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCardsSettings {
    /// Card dump file.
    pub path: Option<String>,
    /// Separate translations file.
    pub localizations: Option<String>,
    /// Set codes to index. Empty means all.
    pub sets: Option<Vec<String>>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
