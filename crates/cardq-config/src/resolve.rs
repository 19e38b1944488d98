//! Path resolution for configured files and directories.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a configured path against the directory of the file that set it.
///
/// Tilde paths expand to the home directory, relative paths join onto
/// `config_dir`, and absolute paths are returned unchanged. The path does not
/// need to exist yet.
pub fn resolve_config_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(config_dir.join(expanded))
    }
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_joins_config_dir() {
        let resolved = resolve_config_path("data/cards.json", Path::new("/project")).unwrap();
        assert_eq!(resolved, PathBuf::from("/project/data/cards.json"));
    }

    #[test]
    fn test_absolute_unchanged() {
        let resolved = resolve_config_path("/var/cards.json", Path::new("/project")).unwrap();
        assert_eq!(resolved, PathBuf::from("/var/cards.json"));
    }

    #[test]
    fn test_tilde_expands_to_home() {
        let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
        let resolved = resolve_config_path("~/cards.json", Path::new("/project")).unwrap();
        assert_eq!(resolved, home.join("cards.json"));
        assert_eq!(resolve_config_path("~", Path::new("/x")).unwrap(), home);
    }
}
