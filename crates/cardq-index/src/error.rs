//! Error types for the cardq-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when building or querying the card indexes.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to open or create an index.
    #[error("failed to open index at {path}: {message}")]
    OpenIndex {
        /// Path to the index directory.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to write to an index.
    #[error("failed to write to index: {0}")]
    Write(String),

    /// Failed to commit changes to an index.
    #[error("failed to commit index: {0}")]
    Commit(String),

    /// Failed to read terms or documents from a loaded index.
    #[error("failed to read index: {0}")]
    Read(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Values were requested before any index was loaded.
    #[error("index is not loaded; call load_index first")]
    NotLoaded,

    /// A build was started before card translations were available.
    #[error("card localizations must be loaded before building the index")]
    LocalizationsNotLoaded,

    /// The build was cancelled before completion.
    #[error("index build was aborted")]
    Aborted,

    /// A build or load is already running.
    #[error("index is already loading")]
    Busy,
}

impl IndexError {
    /// Creates an `OpenIndex` error from a path and Tantivy error.
    pub(crate) fn open_index(path: PathBuf, source: &tantivy::TantivyError) -> Self {
        Self::OpenIndex {
            path,
            message: source.to_string(),
        }
    }

    /// Creates a `Write` error from a Tantivy error.
    pub(crate) fn write(source: &tantivy::TantivyError) -> Self {
        Self::Write(source.to_string())
    }

    /// Creates a `Commit` error from a Tantivy error.
    pub(crate) fn commit(source: &tantivy::TantivyError) -> Self {
        Self::Commit(source.to_string())
    }

    /// Creates a `Read` error from any displayable source.
    pub(crate) fn read(source: &impl ToString) -> Self {
        Self::Read(source.to_string())
    }
}
