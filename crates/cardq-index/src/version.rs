//! Version markers for on-disk indexes.
//!
//! Each logical index lives in `<root>/<kind>/<tag>`. The directory is trusted
//! only while its `version` file holds exactly the expected tag. Builds write
//! into `<tag>.partial`, stamp the marker there, and then rename the staging
//! directory into place, so an interrupted build never looks current.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

/// Name of the marker file inside an index directory.
pub const VERSION_FILE: &str = "version";

/// Suffix of the directory a build writes into.
const STAGING_SUFFIX: &str = "partial";

/// Suffix of the directory a replaced index is moved to before removal.
const RETIRED_SUFFIX: &str = "old";

/// Trust state of an index directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    /// Marker matches the expected tag.
    Current,
    /// Marker exists with a different tag.
    Stale,
    /// No marker.
    Missing,
}

impl VersionStatus {
    /// Short description for display.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Stale => "stale (version changed)",
            Self::Missing => "missing",
        }
    }
}

/// Location and expected tag of one logical index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexVersion {
    /// Directory holding the trusted index.
    pub directory: PathBuf,
    /// Tag the running code expects.
    pub tag: String,
}

impl IndexVersion {
    /// Index `kind` under `root`, versioned by `tag`.
    pub fn new(root: &Path, kind: &str, tag: &str) -> Self {
        Self {
            directory: root.join(kind).join(tag),
            tag: tag.to_string(),
        }
    }

    /// Path of the marker file.
    fn marker_path(&self) -> PathBuf {
        self.directory.join(VERSION_FILE)
    }

    /// Tag stored in the marker, trimmed.
    pub fn stored_tag(&self) -> Option<String> {
        fs::read_to_string(self.marker_path())
            .ok()
            .map(|s| s.trim().to_string())
    }

    /// Compares the stored tag against the expected one.
    pub fn status(&self) -> VersionStatus {
        match self.stored_tag() {
            Some(stored) if stored == self.tag => VersionStatus::Current,
            Some(_) => VersionStatus::Stale,
            None => VersionStatus::Missing,
        }
    }

    /// True when the directory can be loaded without rebuilding.
    pub fn is_up_to_date(&self) -> bool {
        self.status() == VersionStatus::Current
    }

    /// Removes the marker so the next load rebuilds.
    pub fn invalidate(&self) -> io::Result<()> {
        match fs::remove_file(self.marker_path()) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Directory a build writes into before promotion.
    pub fn staging_directory(&self) -> PathBuf {
        self.sibling(STAGING_SUFFIX)
    }

    /// `<tag>.<suffix>` next to the index directory. Tags may contain dots,
    /// so this appends rather than replacing an extension.
    fn sibling(&self, suffix: &str) -> PathBuf {
        self.directory
            .with_file_name(format!("{}.{suffix}", self.tag))
    }

    /// Clears any leftover staging directory and creates an empty one.
    pub fn prepare_staging(&self) -> io::Result<PathBuf> {
        let staging = self.staging_directory();
        self.discard_staging()?;
        fs::create_dir_all(&staging)?;
        Ok(staging)
    }

    /// Removes the staging directory if present.
    pub fn discard_staging(&self) -> io::Result<()> {
        remove_dir_if_exists(&self.staging_directory())
    }

    /// Stamps the staging directory with the expected tag and moves it into
    /// place, replacing any previous index.
    pub fn promote(&self) -> io::Result<()> {
        let staging = self.staging_directory();
        fs::write(staging.join(VERSION_FILE), &self.tag)?;

        let retired = self.sibling(RETIRED_SUFFIX);
        remove_dir_if_exists(&retired)?;
        if self.directory.exists() {
            fs::rename(&self.directory, &retired)?;
        }
        fs::rename(&staging, &self.directory)?;
        if let Err(e) = remove_dir_if_exists(&retired) {
            debug!(path = %retired.display(), error = %e, "could not remove retired index");
        }
        self.prune_other_tags();
        Ok(())
    }

    /// Removes directories left by other tags of the same index.
    fn prune_other_tags(&self) {
        let Some(parent) = self.directory.parent() else {
            return;
        };
        let Ok(entries) = fs::read_dir(parent) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path == self.directory || !path.is_dir() {
                continue;
            }
            match fs::remove_dir_all(&path) {
                Ok(()) => debug!(path = %path.display(), "removed outdated index"),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "could not remove outdated index");
                }
            }
        }
    }
}

/// Recursively removes `path`, ignoring a missing directory.
fn remove_dir_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
