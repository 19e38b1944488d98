//! Locating `.cardq.toml` files.
//!
//! Project files are found by walking from the working directory towards the
//! filesystem root. The global `~/.cardq.toml` comes last.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".cardq.toml";

/// Config files that apply to `cwd`, closest first and global last.
///
/// A file with `root = true` ends the walk and suppresses the global file.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let stops_here = is_root_config(&candidate);
        configs.push(candidate);
        if stops_here {
            return configs;
        }
    }

    if let Some(global) = global_config_path()
        && global.is_file()
        && !configs.contains(&global)
    {
        configs.push(global);
    }
    configs
}

/// `~/.cardq.toml`, if a home directory is known.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// True when `path` is the global config file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::ProjectTree;

    /// Drops the machine-dependent global file.
    fn project_only(configs: Vec<PathBuf>) -> Vec<PathBuf> {
        configs
            .into_iter()
            .filter(|p| !is_global_config(p))
            .collect()
    }

    #[test]
    fn test_nothing_found() {
        let tree = ProjectTree::new();
        let cwd = tree.dir("decks/modern/burn");
        assert!(project_only(discover_config_files(&cwd)).is_empty());
    }

    #[test]
    fn test_closest_file_first() {
        let tree = ProjectTree::new();
        let outer = tree.config("", "[suggest]\nlanguage = \"de\"\n");
        let inner = tree.config("decks", "[suggest]\nlanguage = \"ru\"\n");
        let cwd = tree.dir("decks/modern");

        assert_eq!(project_only(discover_config_files(&cwd)), vec![inner, outer]);
    }

    #[test]
    fn test_directory_named_like_config_is_ignored() {
        let tree = ProjectTree::new();
        fs::create_dir_all(tree.path().join(CONFIG_FILENAME)).unwrap();
        let cwd = tree.dir("decks");

        assert!(project_only(discover_config_files(&cwd)).is_empty());
    }

    #[test]
    fn test_root_file_ends_walk() {
        let tree = ProjectTree::new();
        tree.config("", "[suggest]\nmax_count = 5\n");
        let root = tree.config("collection", "root = true\n");
        let nested = tree.config("collection/decks", "");
        let cwd = tree.dir("collection/decks/legacy");

        assert_eq!(discover_config_files(&cwd), vec![nested, root]);
    }

    #[test]
    fn test_root_false_keeps_walking() {
        let tree = ProjectTree::new();
        let outer = tree.config("", "");
        let inner = tree.config("collection", "root = false\n");
        let cwd = tree.dir("collection/cube");

        assert_eq!(project_only(discover_config_files(&cwd)), vec![inner, outer]);
    }

    #[test]
    fn test_global_path_is_recognized() {
        let path = global_config_path().unwrap();
        assert!(path.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&path));
        assert!(!is_global_config(Path::new("/decks/.cardq.toml")));
    }
}
