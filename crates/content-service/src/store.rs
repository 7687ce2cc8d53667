//! Whole-document persistence for the dataset
//!
//! Every operation reads or rewrites the entire document. There is no cache
//! and no locking: concurrent read-modify-write cycles race and the last
//! writer wins.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::model::Dataset;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read store {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Store {path:?} does not hold a valid dataset: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write store {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode dataset: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    /// Whether the persisted state could not be loaded (as opposed to written)
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Unreadable { .. } | StoreError::Corrupt { .. })
    }
}

/// Durable access to the dataset as a single blob.
pub trait ContentStore: Send + Sync {
    /// Read and decode the whole dataset.
    fn load(&self) -> Result<Dataset, StoreError>;

    /// Replace the whole persisted dataset.
    fn save(&self, dataset: &Dataset) -> Result<(), StoreError>;

    /// Establish a baseline at startup. Always overwrites, never merges.
    fn seed(&self, initial: &Dataset) -> Result<(), StoreError> {
        self.save(initial)
    }
}

/// Stores the dataset as a pretty-printed JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl ContentStore for JsonFileStore {
    fn load(&self) -> Result<Dataset, StoreError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            StoreError::Unreadable {
                path: self.path.clone(),
                source,
            }
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, dataset: &Dataset) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(dataset).map_err(StoreError::Encode)?;

        // Each save gets its own temp file beside the target, swapped in whole
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(self.dir()).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::debug!(
            "Saved dataset ({} users, {} posts) to {:?}",
            dataset.users.len(),
            dataset.posts.len(),
            self.path
        );
        Ok(())
    }
}
