//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    CardsSettings, Config, ConfigError, IndexSettings, SuggestSettings,
    parse::{RawCardsSettings, RawConfig, RawIndexSettings, RawSuggestSettings},
    resolve::resolve_config_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file.
    fn dir(&self) -> Result<&Path, ConfigError> {
        self.path
            .parent()
            .ok_or_else(|| ConfigError::NoParentDirectory {
                path: self.path.clone(),
            })
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every setting the first file
/// that defines it wins. Paths resolve against the directory of the file
/// that defined them.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let Some(first) = configs.first() else {
        return Ok(Config::default());
    };

    let mut index = IndexSettings::default();
    let mut suggest = SuggestSettings::default();
    let mut cards = CardsSettings::default();

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        let dir = parsed.dir()?;
        if let Some(raw) = &parsed.config.index {
            apply_raw_index(&mut index, raw, dir)?;
        }
        if let Some(raw) = &parsed.config.suggest {
            apply_raw_suggest(&mut suggest, raw);
        }
        if let Some(raw) = &parsed.config.cards {
            apply_raw_cards(&mut cards, raw, dir)?;
        }
    }

    Ok(Config {
        index,
        suggest,
        cards,
        config_root: Some(first.dir()?.to_path_buf()),
    })
}

/// Applies raw index settings.
fn apply_raw_index(
    result: &mut IndexSettings,
    raw: &RawIndexSettings,
    dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(root) = &raw.root {
        result.root = Some(resolve_config_path(root, dir)?);
    }
    if let Some(v) = raw.build_heap_size {
        result.build_heap_size = v;
    }
    Ok(())
}

/// Applies raw suggestion settings.
fn apply_raw_suggest(result: &mut SuggestSettings, raw: &RawSuggestSettings) {
    if let Some(v) = raw.max_count {
        result.max_count = v;
    }
    if let Some(v) = &raw.language {
        result.language.clone_from(v);
    }
    if let Some(v) = raw.fuzzy_distance {
        result.fuzzy_distance = v;
    }
}

/// Applies raw card data settings.
fn apply_raw_cards(
    result: &mut CardsSettings,
    raw: &RawCardsSettings,
    dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(path) = &raw.path {
        result.path = Some(resolve_config_path(path, dir)?);
    }
    if let Some(path) = &raw.localizations {
        result.localizations = Some(resolve_config_path(path, dir)?);
    }
    if let Some(sets) = &raw.sets {
        result.sets.clone_from(sets);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config_str;

    /// Parses `toml` as if it lived at `path`.
    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(toml, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn test_empty_list_gives_defaults() {
        let config = merge_configs(&[]).unwrap();
        assert_eq!(config.suggest.max_count, 20);
        assert!(config.config_root.is_none());
    }

    #[test]
    fn test_closest_wins_per_field() {
        let configs = [
            parsed("/home/u/project/.cardq.toml", "[suggest]\nmax_count = 5\n"),
            parsed(
                "/home/u/.cardq.toml",
                "[suggest]\nmax_count = 50\nlanguage = \"de\"\n",
            ),
        ];
        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.suggest.max_count, 5);
        assert_eq!(config.suggest.language, "de");
        assert_eq!(config.suggest.fuzzy_distance, 2);
        assert_eq!(config.config_root, Some(PathBuf::from("/home/u/project")));
    }

    #[test]
    fn test_paths_resolve_against_defining_file() {
        let configs = [
            parsed("/work/app/.cardq.toml", "[index]\nroot = \"idx\"\n"),
            parsed("/work/.cardq.toml", "[cards]\npath = \"data/cards.json\"\n"),
        ];
        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.index.root, Some(PathBuf::from("/work/app/idx")));
        assert_eq!(config.cards.path, Some(PathBuf::from("/work/data/cards.json")));
    }

    #[test]
    fn test_sets_list_replaced_not_merged() {
        let configs = [
            parsed("/a/b/.cardq.toml", "[cards]\nsets = [\"MIR\"]\n"),
            parsed("/a/.cardq.toml", "[cards]\nsets = [\"LEA\", \"CSP\"]\n"),
        ];
        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.cards.sets, vec!["MIR".to_string()]);
    }
}
