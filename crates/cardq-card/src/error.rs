//! Error types for loading card data.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when loading a card database.
#[derive(Debug, Error)]
pub enum CardError {
    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file is not a valid card dump.
    #[error("invalid card data in {path}: {source}")]
    Parse {
        /// Path to the malformed file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Two sets share a code.
    #[error("duplicate set code: {code}")]
    DuplicateSet {
        /// The repeated set code.
        code: String,
    },
}
