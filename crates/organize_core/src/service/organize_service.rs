//! Use-case facade over the entity stores.
//!
//! # Responsibility
//! - Implement every cascade sequence triggered by a single user action.
//! - Keep cached descendant counts synchronized on every mutation.
//! - Write dirty collections through to storage after each commit.
//!
//! # Invariants
//! - Every context keeps ≥1 block and every block keeps ≥1 sub-block after
//!   any public operation; operations that would break this are rejected
//!   before mutating anything.
//! - `Mode.current_context` always references a live context.
//! - Import failures leave the stores untouched.
//! - Write-through failures are logged and never surfaced.

use crate::model::entity::{Block, Context, ContextValidationError, Mode, SubBlock};
use crate::persist::{StorageAdapter, StorageKey};
use crate::snapshot::{self, normalize_mode, RawMode, Snapshot, SnapshotError};
use crate::store::entity_store::EntityStore;
use crate::store::reorder::{swap_contexts, swap_items, Direction};
use crate::store::state::AppState;
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_CONTEXT_NAME: &str = "New Context";
const DEFAULT_BLOCK_NAME: &str = "New Section";
const DEFAULT_SUB_BLOCK_NAME: &str = "New Item";

/// Service-level operation failure.
#[derive(Debug)]
pub enum ServiceError {
    /// No context with the given id.
    ContextNotFound(String),
    /// No block with the given id.
    BlockNotFound(String),
    /// No sub-block with the given id.
    SubBlockNotFound(String),
    /// Context name length bound violated; nothing was mutated.
    Validation(ContextValidationError),
    /// Deleting the final context is not allowed.
    LastContext,
    /// Deleting the only sub-block of a context's only block is not allowed.
    LastBlock,
    /// Import/export failure.
    Snapshot(SnapshotError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContextNotFound(id) => write!(f, "context not found: {id}"),
            Self::BlockNotFound(id) => write!(f, "block not found: {id}"),
            Self::SubBlockNotFound(id) => write!(f, "sub-block not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::LastContext => write!(f, "the final context cannot be deleted"),
            Self::LastBlock => write!(
                f,
                "the only sub-block of a context's only block cannot be deleted"
            ),
            Self::Snapshot(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContextValidationError> for ServiceError {
    fn from(value: ContextValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SnapshotError> for ServiceError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Facade owning the application state and its storage adapter.
pub struct OrganizeService<S: StorageAdapter> {
    state: AppState,
    storage: S,
}

impl<S: StorageAdapter> OrganizeService<S> {
    /// Restores state from storage (trusted path) or falls back to the seed
    /// state; startup never blocks on storage problems.
    pub fn load(storage: S) -> Self {
        let state = match restore_state(&storage) {
            Ok(state) => state,
            Err(reason) => {
                warn!("event=restore_fallback module=core status=warn reason={reason}");
                AppState::initial()
            }
        };
        Self { state, storage }
    }

    /// Creates a service over an explicit state, e.g. for tests.
    pub fn with_state(state: AppState, storage: S) -> Self {
        Self { state, storage }
    }

    /// Read access for rendering and assertions.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    // --- contexts ---

    /// Creates a context seeded with one block and one sub-block.
    pub fn add_context(&mut self) -> Context {
        let context = Context::new(DEFAULT_CONTEXT_NAME);
        let block = Block::new(DEFAULT_BLOCK_NAME, context.id.clone());
        let sub_block = SubBlock::new(DEFAULT_SUB_BLOCK_NAME, block.id.clone());

        self.state.contexts.add(context.clone());
        self.state.blocks.add(block);
        self.state.sub_blocks.add(sub_block);
        self.persist(&[
            StorageKey::Contexts,
            StorageKey::Blocks,
            StorageKey::SubBlocks,
        ]);
        context
    }

    /// Renames a context, enforcing the 1–28 character bound.
    pub fn rename_context(&mut self, id: &str, name: &str) -> Result<(), ServiceError> {
        Context::validate_name(name)?;
        let mut context = self
            .state
            .contexts
            .find(id)
            .cloned()
            .ok_or_else(|| ServiceError::ContextNotFound(id.to_string()))?;
        context.name = name.to_string();
        self.state.contexts.update(context);
        self.persist(&[StorageKey::Contexts]);
        Ok(())
    }

    /// Deletes a context and every block and sub-block under it.
    ///
    /// When the deleted context was active, `Mode.current_context` moves to
    /// the first remaining context. The final context cannot be deleted.
    pub fn delete_context(&mut self, id: &str) -> Result<(), ServiceError> {
        if self.state.contexts.find(id).is_none() {
            return Err(ServiceError::ContextNotFound(id.to_string()));
        }
        if self.state.contexts.len() == 1 {
            return Err(ServiceError::LastContext);
        }

        let owned_blocks: HashSet<String> = self
            .state
            .blocks
            .items()
            .iter()
            .filter(|block| block.context == id)
            .map(|block| block.id.clone())
            .collect();
        let remaining_sub_blocks: Vec<SubBlock> = self
            .state
            .sub_blocks
            .items()
            .iter()
            .filter(|sub_block| !owned_blocks.contains(&sub_block.block))
            .cloned()
            .collect();
        let remaining_blocks: Vec<Block> = self
            .state
            .blocks
            .items()
            .iter()
            .filter(|block| block.context != id)
            .cloned()
            .collect();

        self.state.sub_blocks.set_all(remaining_sub_blocks);
        self.state.blocks.set_all(remaining_blocks);
        self.state.contexts.delete(id);

        if self.state.mode.current_context == id {
            if let Some(next) = self.state.contexts.items().first() {
                self.state.mode.current_context = next.id.clone();
            }
        }

        self.persist(&StorageKey::ALL);
        Ok(())
    }

    /// Swaps a context with its neighbor.
    pub fn reorder_contexts(&mut self, index: usize, direction: Direction) {
        let reordered = swap_contexts(self.state.contexts.items(), index, direction);
        self.state.contexts.set_all(reordered);
        self.persist(&[StorageKey::Contexts]);
    }

    // --- blocks ---

    /// Creates a block (with one seeded sub-block) under a context.
    pub fn add_block(&mut self, context_id: &str) -> Result<Block, ServiceError> {
        let mut context = self
            .state
            .contexts
            .find(context_id)
            .cloned()
            .ok_or_else(|| ServiceError::ContextNotFound(context_id.to_string()))?;
        context.block_count += 1;
        context.sub_block_count += 1;

        let block = Block::new(DEFAULT_BLOCK_NAME, context_id);
        let sub_block = SubBlock::new(DEFAULT_SUB_BLOCK_NAME, block.id.clone());

        self.state.contexts.update(context);
        self.state.blocks.add(block.clone());
        self.state.sub_blocks.add(sub_block);
        self.persist(&[
            StorageKey::Contexts,
            StorageKey::Blocks,
            StorageKey::SubBlocks,
        ]);
        Ok(block)
    }

    /// Renames a block; block names carry no length bound.
    pub fn rename_block(&mut self, id: &str, name: &str) -> Result<(), ServiceError> {
        let mut block = self
            .state
            .blocks
            .find(id)
            .cloned()
            .ok_or_else(|| ServiceError::BlockNotFound(id.to_string()))?;
        block.name = name.to_string();
        self.state.blocks.update(block);
        self.persist(&[StorageKey::Blocks]);
        Ok(())
    }

    /// Swaps a block with its neighbor within one context's scoped list.
    pub fn reorder_blocks(&mut self, context_id: &str, index: usize, direction: Direction) {
        let scoped = self.state.blocks_in(context_id);
        let reordered = swap_items(&scoped, self.state.blocks.items(), index, direction);
        self.state.blocks.set_all(reordered);
        self.persist(&[StorageKey::Blocks]);
    }

    // --- sub-blocks ---

    /// Creates a sub-block under a block, crediting both cached counts.
    pub fn add_sub_block(&mut self, block_id: &str) -> Result<SubBlock, ServiceError> {
        let mut block = self
            .state
            .blocks
            .find(block_id)
            .cloned()
            .ok_or_else(|| ServiceError::BlockNotFound(block_id.to_string()))?;
        let mut context = self
            .state
            .contexts
            .find(&block.context)
            .cloned()
            .ok_or_else(|| ServiceError::ContextNotFound(block.context.clone()))?;

        context.sub_block_count += 1;
        block.sub_block_count += 1;
        let sub_block = SubBlock::new(DEFAULT_SUB_BLOCK_NAME, block_id);

        self.state.contexts.update(context);
        self.state.blocks.update(block);
        self.state.sub_blocks.add(sub_block.clone());
        self.persist(&[
            StorageKey::Contexts,
            StorageKey::Blocks,
            StorageKey::SubBlocks,
        ]);
        Ok(sub_block)
    }

    /// Replaces a sub-block's editable fields.
    pub fn update_sub_block(
        &mut self,
        id: &str,
        name: impl Into<String>,
        contents: impl Into<String>,
        is_striked: bool,
    ) -> Result<(), ServiceError> {
        let mut sub_block = self
            .state
            .sub_blocks
            .find(id)
            .cloned()
            .ok_or_else(|| ServiceError::SubBlockNotFound(id.to_string()))?;
        sub_block.name = name.into();
        sub_block.contents = contents.into();
        sub_block.is_striked = is_striked;
        self.state.sub_blocks.update(sub_block);
        self.persist(&[StorageKey::SubBlocks]);
        Ok(())
    }

    /// Flips a sub-block's strike state, returning the new value.
    pub fn toggle_striked(&mut self, id: &str) -> Result<bool, ServiceError> {
        let mut sub_block = self
            .state
            .sub_blocks
            .find(id)
            .cloned()
            .ok_or_else(|| ServiceError::SubBlockNotFound(id.to_string()))?;
        sub_block.is_striked = !sub_block.is_striked;
        let striked = sub_block.is_striked;
        self.state.sub_blocks.update(sub_block);
        self.persist(&[StorageKey::SubBlocks]);
        Ok(striked)
    }

    /// Deletes a sub-block, cascading to its block when the block empties.
    ///
    /// Deleting the only sub-block of a context's only block is rejected so
    /// the context never drops below one block.
    pub fn delete_sub_block(&mut self, id: &str) -> Result<(), ServiceError> {
        let sub_block = self
            .state
            .sub_blocks
            .find(id)
            .cloned()
            .ok_or_else(|| ServiceError::SubBlockNotFound(id.to_string()))?;
        let mut block = self
            .state
            .blocks
            .find(&sub_block.block)
            .cloned()
            .ok_or_else(|| ServiceError::BlockNotFound(sub_block.block.clone()))?;
        let mut context = self
            .state
            .contexts
            .find(&block.context)
            .cloned()
            .ok_or_else(|| ServiceError::ContextNotFound(block.context.clone()))?;

        if block.sub_block_count == 1 && context.block_count == 1 {
            return Err(ServiceError::LastBlock);
        }

        block.sub_block_count = block.sub_block_count.saturating_sub(1);
        self.state.sub_blocks.delete(id);

        if block.sub_block_count == 0 {
            context.block_count = context.block_count.saturating_sub(1);
            self.state.blocks.delete(&block.id);
        } else {
            self.state.blocks.update(block);
        }

        context.sub_block_count = context.sub_block_count.saturating_sub(1);
        self.state.contexts.update(context);
        self.persist(&[
            StorageKey::Contexts,
            StorageKey::Blocks,
            StorageKey::SubBlocks,
        ]);
        Ok(())
    }

    /// Swaps a sub-block with its neighbor within one block's scoped list.
    pub fn reorder_sub_blocks(&mut self, block_id: &str, index: usize, direction: Direction) {
        let scoped = self.state.sub_blocks_in(block_id);
        let reordered = swap_items(&scoped, self.state.sub_blocks.items(), index, direction);
        self.state.sub_blocks.set_all(reordered);
        self.persist(&[StorageKey::SubBlocks]);
    }

    // --- mode ---

    /// Replaces the mode singleton wholesale.
    pub fn update_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.persist(&[StorageKey::Mode]);
    }

    /// Switches the active context after verifying it exists.
    pub fn set_current_context(&mut self, id: &str) -> Result<(), ServiceError> {
        if self.state.contexts.find(id).is_none() {
            return Err(ServiceError::ContextNotFound(id.to_string()));
        }
        let mut mode = self.state.mode.clone();
        mode.current_context = id.to_string();
        self.update_mode(mode);
        Ok(())
    }

    /// Sets the active theme (0 light, 1 dark).
    pub fn set_theme(&mut self, theme: u8) {
        let mut mode = self.state.mode.clone();
        mode.current_theme = theme;
        self.update_mode(mode);
    }

    /// Shows or hides editing controls.
    pub fn set_show_edit_icons(&mut self, show: bool) {
        let mut mode = self.state.mode.clone();
        mode.show_edit_icons = show;
        self.update_mode(mode);
    }

    // --- snapshots ---

    /// Serializes the full state as indented JSON for export.
    pub fn export_json(&self) -> Result<String, ServiceError> {
        Ok(snapshot::export_json(&Snapshot::of_state(&self.state))?)
    }

    /// Imports untrusted snapshot text, replacing the full state on success.
    ///
    /// All-or-nothing: any validation failure leaves the stores untouched.
    pub fn import_json(&mut self, text: &str) -> Result<(), ServiceError> {
        let snapshot = snapshot::import_snapshot(text)?;
        self.state = snapshot.into_state();
        self.persist(&StorageKey::ALL);
        info!(
            "event=import_committed module=core status=ok contexts={} blocks={} sub_blocks={}",
            self.state.contexts.len(),
            self.state.blocks.len(),
            self.state.sub_blocks.len()
        );
        Ok(())
    }

    /// Writes dirty collections through to storage, best-effort.
    fn persist(&mut self, keys: &[StorageKey]) {
        for &key in keys {
            let serialized = match key {
                StorageKey::Mode => serde_json::to_string(&self.state.mode),
                StorageKey::Contexts => serde_json::to_string(self.state.contexts.items()),
                StorageKey::Blocks => serde_json::to_string(self.state.blocks.items()),
                StorageKey::SubBlocks => serde_json::to_string(self.state.sub_blocks.items()),
            };
            let text = match serialized {
                Ok(text) => text,
                Err(err) => {
                    warn!("event=persist_encode_failed module=core status=warn key={key} error={err}");
                    continue;
                }
            };
            if let Err(err) = self.storage.store(key, &text) {
                warn!("event=persist_failed module=core status=warn key={key} error={err}");
            }
        }
    }
}

/// Trusted restore: lenient mode normalization, collections taken as-is.
fn restore_state<S: StorageAdapter>(storage: &S) -> Result<AppState, String> {
    let mut texts = Vec::with_capacity(StorageKey::ALL.len());
    for key in StorageKey::ALL {
        match storage.load(key) {
            Ok(Some(text)) => texts.push(text),
            Ok(None) => return Err(format!("no stored `{key}` collection")),
            Err(err) => return Err(format!("failed to load `{key}`: {err}")),
        }
    }

    let [mode_text, contexts_text, blocks_text, sub_blocks_text] = texts.as_slice() else {
        return Err("incomplete stored state".to_string());
    };

    let raw_mode: RawMode = serde_json::from_str(mode_text)
        .map_err(|err| format!("stored `mode` is unreadable: {err}"))?;
    let contexts: Vec<_> = serde_json::from_str(contexts_text)
        .map_err(|err| format!("stored `contexts` are unreadable: {err}"))?;
    let blocks: Vec<_> = serde_json::from_str(blocks_text)
        .map_err(|err| format!("stored `blocks` are unreadable: {err}"))?;
    let sub_blocks: Vec<_> = serde_json::from_str(sub_blocks_text)
        .map_err(|err| format!("stored `subBlocks` are unreadable: {err}"))?;

    Ok(AppState {
        mode: normalize_mode(raw_mode),
        contexts: EntityStore::new(contexts),
        blocks: EntityStore::new(blocks),
        sub_blocks: EntityStore::new(sub_blocks),
    })
}
