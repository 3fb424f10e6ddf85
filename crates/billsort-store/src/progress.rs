//! Durable set of filenames that have been fully processed.
//!
//! Stored as a pretty-printed JSON array of strings. The set only grows:
//! one entry is added per finalised bill and the file is rewritten at once,
//! so a crash on a later bill keeps earlier progress.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::StoreError;

/// Filenames already finalised, in sorted order.
pub type ProcessedSet = BTreeSet<String>;

/// File-backed checkpoint of processed filenames.
///
/// Writes overwrite the file in place; there is no atomic replace, so a crash
/// mid-write can leave a truncated file that [`load`](Self::load) rejects.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the checkpoint, or an empty set if none has been written yet.
    pub fn load(&self) -> Result<ProcessedSet, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no checkpoint yet");
                return Ok(ProcessedSet::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let set: ProcessedSet =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::CorruptCheckpoint {
                path: self.path.clone(),
                source,
            })?;
        info!(path = %self.path.display(), count = set.len(), "loaded checkpoint");
        Ok(set)
    }

    /// Overwrite the checkpoint with `set`.
    pub fn save(&self, set: &ProcessedSet) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let json = serde_json::to_vec_pretty(set)?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::io(&self.path, e))?;
        debug!(path = %self.path.display(), count = set.len(), "saved checkpoint");
        Ok(())
    }
}
