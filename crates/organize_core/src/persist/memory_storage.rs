//! In-memory storage adapter for tests and embedding hosts.

use crate::persist::{StorageAdapter, StorageKey, StorageResult};
use std::collections::HashMap;

/// Keeps stored values in a process-local map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<StorageKey, String>,
}

impl MemoryStorage {
    /// Creates an empty adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates one key, e.g. to simulate an existing installation.
    pub fn with_value(mut self, key: StorageKey, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }
}

impl StorageAdapter for MemoryStorage {
    fn load(&self, key: StorageKey) -> StorageResult<Option<String>> {
        Ok(self.values.get(&key).cloned())
    }

    fn store(&mut self, key: StorageKey, value: &str) -> StorageResult<()> {
        self.values.insert(key, value.to_string());
        Ok(())
    }
}
