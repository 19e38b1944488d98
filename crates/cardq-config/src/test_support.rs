//! Scratch directory trees for config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A throwaway project tree holding `.cardq.toml` files and card dumps.
pub struct ProjectTree {
    /// Removed on drop.
    temp: TempDir,
}

impl ProjectTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self {
            temp: tempfile::tempdir().unwrap(),
        }
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Ensures `rel` exists as a directory and returns its path.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes `.cardq.toml` into `rel` (empty for the root) with `content`.
    pub fn config(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir(rel).join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    /// Writes an empty card dump at `rel`.
    pub fn cards(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, r#"{"sets": []}"#).unwrap();
        path
    }
}
