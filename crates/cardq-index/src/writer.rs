//! Index writer shared by the document and word index builds.

use std::{fs, path::Path};

use tantivy::{
    Index, IndexWriter as TantivyIndexWriter, TantivyDocument, directory::MmapDirectory,
    schema::Schema,
};

use crate::{analyzer::CardAnalyzer, error::IndexError};

/// Default heap size for the index writer (50 MB).
pub const DEFAULT_HEAP_SIZE: usize = 50_000_000;

/// Tantivy rejects writer heaps below this.
const MIN_HEAP_SIZE: usize = 15_000_000;

/// Opens a Tantivy index directory with the card analyzers registered.
pub fn open_index(path: &Path, schema: &Schema) -> Result<Index, IndexError> {
    let dir = MmapDirectory::open(path).map_err(|e| {
        let err: tantivy::TantivyError = e.into();
        IndexError::open_index(path.to_path_buf(), &err)
    })?;

    let index = Index::open_or_create(dir, schema.clone())
        .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
    CardAnalyzer::new().register(&index);
    Ok(index)
}

/// Writes documents into one index directory.
pub struct IndexWriter {
    /// The underlying Tantivy writer.
    writer: TantivyIndexWriter,
}

impl IndexWriter {
    /// Opens or creates an index at `path` with `schema`.
    pub fn open(path: &Path, schema: &Schema, heap_size: usize) -> Result<Self, IndexError> {
        fs::create_dir_all(path)?;
        let index = open_index(path, schema)?;
        let writer = index
            .writer(heap_size.max(MIN_HEAP_SIZE))
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        Ok(Self { writer })
    }

    /// Stages a document. It becomes visible after [`Self::commit`].
    pub fn add(&mut self, doc: TantivyDocument) -> Result<(), IndexError> {
        self.writer
            .add_document(doc)
            .map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Commits all pending documents.
    pub fn commit(&mut self) -> Result<(), IndexError> {
        self.writer.commit().map_err(|e| IndexError::commit(&e))?;
        Ok(())
    }

    /// Waits for merge threads and releases the directory lock.
    pub fn finish(self) -> Result<(), IndexError> {
        self.writer
            .wait_merging_threads()
            .map_err(|e| IndexError::commit(&e))
    }
}
