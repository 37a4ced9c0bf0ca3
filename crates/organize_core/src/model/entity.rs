//! Entity records and model-level validation.
//!
//! # Responsibility
//! - Define `Context`, `Block`, `SubBlock` and the `Mode` singleton.
//! - Provide constructors that seed the ≥1-descendant invariants.
//! - Enforce the context name length bound before any mutation.
//!
//! # Invariants
//! - `Context.block_count`/`Context.sub_block_count` and
//!   `Block.sub_block_count` are cached denormalized counts; the service
//!   layer keeps them synchronized on every cascade.
//! - Serialized names use the camelCase wire format (`blockCount`,
//!   `isStriked`, ...) so exports from older data import cleanly.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque unique entity identifier.
///
/// Kept as a string alias because imported data may carry arbitrary id
/// values; freshly created entities use random UUIDs.
pub type EntityId = String;

/// Maximum context name length in characters.
pub const MAX_CONTEXT_NAME_CHARS: usize = 28;

/// Generates a fresh collision-free entity id.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4().to_string()
}

/// Common id access for store and reorder operations.
pub trait Entity {
    /// Returns the stable entity id.
    fn id(&self) -> &str;
}

/// Validation error for context names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValidationError {
    /// Name is empty.
    NameEmpty,
    /// Name exceeds [`MAX_CONTEXT_NAME_CHARS`].
    NameTooLong { length: usize },
}

impl Display for ContextValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameEmpty => write!(f, "context names must contain at least 1 character"),
            Self::NameTooLong { length } => write!(
                f,
                "context names must be no longer than {MAX_CONTEXT_NAME_CHARS} characters, got {length}"
            ),
        }
    }
}

impl Error for ContextValidationError {}

/// Top-level named page holding ordered blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    /// Stable opaque id.
    pub id: EntityId,
    /// Display name, 1–28 characters.
    pub name: String,
    /// Cached count of blocks owned by this context.
    pub block_count: u32,
    /// Cached count of sub-blocks transitively under this context.
    pub sub_block_count: u32,
}

impl Context {
    /// Creates a context with a fresh id and seeded counts.
    ///
    /// The counts start at 1 because every context is created together with
    /// one block and one sub-block.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            block_count: 1,
            sub_block_count: 1,
        }
    }

    /// Checks the 1–28 character name bound.
    pub fn validate_name(name: &str) -> Result<(), ContextValidationError> {
        let length = name.chars().count();
        if length < 1 {
            return Err(ContextValidationError::NameEmpty);
        }
        if length > MAX_CONTEXT_NAME_CHARS {
            return Err(ContextValidationError::NameTooLong { length });
        }
        Ok(())
    }
}

impl Entity for Context {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Named section within a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Stable opaque id.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Owning [`Context`] id (lookup reference, no back-pointer).
    pub context: EntityId,
    /// Cached count of sub-blocks owned by this block.
    pub sub_block_count: u32,
}

impl Block {
    /// Creates a block with a fresh id and a seeded sub-block count of 1.
    pub fn new(name: impl Into<String>, context: impl Into<EntityId>) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            context: context.into(),
            sub_block_count: 1,
        }
    }
}

impl Entity for Block {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Strikeable item with free-text contents within a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubBlock {
    /// Stable opaque id.
    pub id: EntityId,
    /// Display title.
    pub name: String,
    /// Owning [`Block`] id (lookup reference, no back-pointer).
    pub block: EntityId,
    /// Free text; may embed `[title](url)` link markers, stored verbatim.
    pub contents: String,
    /// Whether the title is struck through.
    pub is_striked: bool,
}

impl SubBlock {
    /// Creates a sub-block with a fresh id, empty contents and no strike.
    pub fn new(name: impl Into<String>, block: impl Into<EntityId>) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            block: block.into(),
            contents: String::new(),
            is_striked: false,
        }
    }
}

impl Entity for SubBlock {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Singleton view settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    /// Whether editing controls are shown.
    pub show_edit_icons: bool,
    /// Id of the active [`Context`]; always references a live context.
    pub current_context: EntityId,
    /// Active theme: 0 light, 1 dark.
    pub current_theme: u8,
}

impl Default for Mode {
    fn default() -> Self {
        Self {
            show_edit_icons: true,
            current_context: "0".to_string(),
            current_theme: 0,
        }
    }
}
