//! Storage adapter contracts and implementations.
//!
//! # Responsibility
//! - Define the key→string persistence interface consumed by the service.
//! - Keep the storage medium (files, embedding host) out of core logic.
//!
//! # Invariants
//! - One key per collection; values are that collection's JSON text.
//! - Adapters never interpret the stored text.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod file_storage;
mod memory_storage;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// Result type used by storage adapters.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer failure.
///
/// Write-through failures are logged by the service and never surfaced to
/// the user; load failures at startup fall back to the seed state.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying io failure.
    Io(std::io::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "storage io failure: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Persistence key, one per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The `Mode` singleton.
    Mode,
    /// The context collection.
    Contexts,
    /// The block collection.
    Blocks,
    /// The sub-block collection.
    SubBlocks,
}

impl StorageKey {
    /// All keys, in snapshot order.
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Mode,
        StorageKey::Contexts,
        StorageKey::Blocks,
        StorageKey::SubBlocks,
    ];

    /// Wire name of the key, identical to the snapshot field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::Contexts => "contexts",
            Self::Blocks => "blocks",
            Self::SubBlocks => "subBlocks",
        }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key→string persistence interface.
pub trait StorageAdapter {
    /// Loads the stored text for one key, `None` when absent.
    fn load(&self, key: StorageKey) -> StorageResult<Option<String>>;
    /// Stores the text for one key, replacing any previous value.
    fn store(&mut self, key: StorageKey, value: &str) -> StorageResult<()>;
}
