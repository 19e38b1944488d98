//! Errors raised while loading `.cardq.toml` files.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::de;

/// Why a configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("cannot read {path}: {source}")]
    ReadFile {
        /// File that failed.
        path: PathBuf,
        /// I/O failure.
        source: io::Error,
    },

    /// A config file is not valid TOML for the cardq layout.
    #[error("invalid configuration in {path}: {source}")]
    ParseToml {
        /// File that failed.
        path: PathBuf,
        /// Parser failure, with line and column.
        source: de::Error,
    },

    /// A `~` path was used but no home directory is known.
    #[error("cannot expand '~': home directory unknown")]
    NoHomeDirectory,

    /// Relative paths cannot be resolved for a file without a parent.
    #[error("config file has no parent directory: {path}")]
    NoParentDirectory {
        /// The offending path.
        path: PathBuf,
    },
}
