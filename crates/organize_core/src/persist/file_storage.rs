//! File-backed storage adapter.
//!
//! # Invariants
//! - One `<key>.json` file per collection under the configured directory.
//! - A missing file reads as an absent value, not an error.

use crate::persist::{StorageAdapter, StorageKey, StorageResult};
use std::io::ErrorKind;
use std::path::PathBuf;

/// Stores each collection as one JSON file under a base directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Creates an adapter rooted at `base_dir`; the directory is created
    /// lazily on first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.base_dir.join(format!("{}.json", key.as_str()))
    }
}

impl StorageAdapter for FileStorage {
    fn load(&self, key: StorageKey) -> StorageResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&mut self, key: StorageKey, value: &str) -> StorageResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}
