//! Full-state snapshots: validation/import and export.
//!
//! # Responsibility
//! - Define the `{ mode, contexts, blocks, subBlocks }` snapshot shape.
//! - Validate untrusted imports and recompute every cached count.
//! - Serialize exports as indented JSON with a dated file name.
//!
//! # Invariants
//! - Import is all-or-nothing: a snapshot is either fully valid or the
//!   caller's stores are left untouched.
//! - Cached counts supplied by imported data are never trusted.

use crate::model::entity::{Block, Context, Mode, SubBlock};
use crate::store::entity_store::EntityStore;
use crate::store::state::AppState;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod export;
mod import;

pub use export::{export_file_name, export_json};
pub use import::import_snapshot;
pub(crate) use import::{normalize_mode, RawMode};

/// Entity kind named by field-level import errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A context record.
    Context,
    /// A block record.
    Block,
    /// A sub-block record.
    SubBlock,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Context => f.write_str("context"),
            Self::Block => f.write_str("block"),
            Self::SubBlock => f.write_str("sub-block"),
        }
    }
}

/// Import/export failure.
#[derive(Debug)]
pub enum SnapshotError {
    /// Input text is not valid JSON, or a snapshot failed to serialize.
    Parse(serde_json::Error),
    /// One of the four collections is absent from the snapshot.
    MissingCollection(&'static str),
    /// A required field is absent or not a string.
    MissingField {
        /// Kind of the offending entity.
        entity: EntityKind,
        /// Wire name of the offending field.
        field: &'static str,
    },
    /// A context's recomputed block or sub-block count is zero.
    EmptyContext {
        /// Id of the offending context.
        context_id: String,
    },
    /// A block's recomputed sub-block count is zero.
    EmptyBlock {
        /// Id of the offending block.
        block_id: String,
    },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "snapshot text is not valid JSON: {err}"),
            Self::MissingCollection(name) => {
                write!(f, "snapshot is missing the `{name}` collection")
            }
            Self::MissingField { entity, field } => {
                write!(f, "a {entity}'s {field} is missing or in the wrong format")
            }
            Self::EmptyContext { context_id } => write!(
                f,
                "context {context_id} must keep at least one block and one sub-block"
            ),
            Self::EmptyBlock { block_id } => {
                write!(f, "block {block_id} must keep at least one sub-block")
            }
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Validated full-state snapshot in wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// View settings.
    pub mode: Mode,
    /// Ordered contexts.
    pub contexts: Vec<Context>,
    /// Ordered blocks, flat across contexts.
    pub blocks: Vec<Block>,
    /// Ordered sub-blocks, flat across blocks.
    pub sub_blocks: Vec<SubBlock>,
}

impl Snapshot {
    /// Captures the current state.
    pub fn of_state(state: &AppState) -> Self {
        Self {
            mode: state.mode.clone(),
            contexts: state.contexts.items().to_vec(),
            blocks: state.blocks.items().to_vec(),
            sub_blocks: state.sub_blocks.items().to_vec(),
        }
    }

    /// Converts a validated snapshot into live state.
    pub fn into_state(self) -> AppState {
        AppState {
            mode: self.mode,
            contexts: EntityStore::new(self.contexts),
            blocks: EntityStore::new(self.blocks),
            sub_blocks: EntityStore::new(self.sub_blocks),
        }
    }
}
