//! Untrusted-import validation and count recomputation.
//!
//! # Responsibility
//! - Check required fields on every entity of a candidate snapshot.
//! - Recompute all cached counts from actual membership.
//! - Reject snapshots that would violate the ≥1-descendant invariants.
//!
//! # Invariants
//! - Supplied counts are ignored entirely.
//! - Optional sub-block fields are defaulted, never rejected.
//! - Mode is normalized leniently on both the trusted and untrusted paths.

use crate::model::entity::{Block, Context, Mode, SubBlock};
use crate::snapshot::{EntityKind, Snapshot, SnapshotError};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

const FALLBACK_CONTEXT_ID: &str = "0";

/// Loosely-typed `Mode` as found in external data.
///
/// Shared with the trusted restore path, which applies the same lenient
/// normalization without re-validating collections.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawMode {
    #[serde(default)]
    show_edit_icons: Option<Value>,
    #[serde(default)]
    current_context: Option<Value>,
    #[serde(default)]
    current_theme: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    mode: Option<RawMode>,
    #[serde(default)]
    contexts: Option<Vec<RawContext>>,
    #[serde(default)]
    blocks: Option<Vec<RawBlock>>,
    #[serde(default, rename = "subBlocks")]
    sub_blocks: Option<Vec<RawSubBlock>>,
}

#[derive(Debug, Deserialize)]
struct RawContext {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    context: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubBlock {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    block: Option<Value>,
    #[serde(default)]
    contents: Option<Value>,
    #[serde(default)]
    is_striked: Option<Value>,
}

/// Parses and fully validates untrusted snapshot text.
///
/// Runs the whole pipeline: JSON parse, required-field checks, count
/// recomputation, invariant checks, mode normalization. Returns a snapshot
/// whose cached counts are derived from actual membership.
///
/// # Errors
/// - [`SnapshotError::Parse`] when the text is not valid JSON.
/// - [`SnapshotError::MissingCollection`] when a collection is absent.
/// - [`SnapshotError::MissingField`] naming the entity kind and field.
/// - [`SnapshotError::EmptyContext`]/[`SnapshotError::EmptyBlock`] when a
///   recomputed count is zero.
pub fn import_snapshot(text: &str) -> Result<Snapshot, SnapshotError> {
    let raw: RawSnapshot = serde_json::from_str(text)?;
    validate_snapshot(raw)
}

fn validate_snapshot(raw: RawSnapshot) -> Result<Snapshot, SnapshotError> {
    let raw_mode = raw.mode.ok_or(SnapshotError::MissingCollection("mode"))?;
    let raw_contexts = raw
        .contexts
        .ok_or(SnapshotError::MissingCollection("contexts"))?;
    let raw_blocks = raw
        .blocks
        .ok_or(SnapshotError::MissingCollection("blocks"))?;
    let raw_sub_blocks = raw
        .sub_blocks
        .ok_or(SnapshotError::MissingCollection("subBlocks"))?;

    // Validate required fields first; counts start at zero and are credited
    // from actual membership below.
    let mut contexts = Vec::with_capacity(raw_contexts.len());
    let mut context_counts: HashMap<String, (u32, u32)> = HashMap::new();
    for raw_context in raw_contexts {
        let id = required_string(raw_context.id.as_ref(), EntityKind::Context, "id")?;
        let name = required_string(raw_context.name.as_ref(), EntityKind::Context, "name")?;
        context_counts.insert(id.clone(), (0, 0));
        contexts.push(Context {
            id,
            name,
            block_count: 0,
            sub_block_count: 0,
        });
    }

    let mut blocks = Vec::with_capacity(raw_blocks.len());
    let mut block_owners: HashMap<String, String> = HashMap::new();
    let mut block_counts: HashMap<String, u32> = HashMap::new();
    for raw_block in raw_blocks {
        let id = required_string(raw_block.id.as_ref(), EntityKind::Block, "id")?;
        let name = required_string(raw_block.name.as_ref(), EntityKind::Block, "name")?;
        let context = required_string(raw_block.context.as_ref(), EntityKind::Block, "context")?;

        if let Some((block_count, _)) = context_counts.get_mut(&context) {
            *block_count += 1;
        }
        block_owners.insert(id.clone(), context.clone());
        block_counts.insert(id.clone(), 0);
        blocks.push(Block {
            id,
            name,
            context,
            sub_block_count: 0,
        });
    }

    let mut sub_blocks = Vec::with_capacity(raw_sub_blocks.len());
    for raw_sub_block in raw_sub_blocks {
        let id = required_string(raw_sub_block.id.as_ref(), EntityKind::SubBlock, "id")?;
        let name = required_string(raw_sub_block.name.as_ref(), EntityKind::SubBlock, "name")?;
        let block = required_string(raw_sub_block.block.as_ref(), EntityKind::SubBlock, "block")?;
        let contents = match raw_sub_block.contents {
            Some(Value::String(text)) => text,
            _ => String::new(),
        };
        let is_striked = match raw_sub_block.is_striked {
            Some(Value::Bool(flag)) => flag,
            _ => false,
        };

        if let Some(count) = block_counts.get_mut(&block) {
            *count += 1;
        }
        if let Some(context) = block_owners.get(&block) {
            if let Some((_, sub_block_count)) = context_counts.get_mut(context) {
                *sub_block_count += 1;
            }
        }
        sub_blocks.push(SubBlock {
            id,
            name,
            block,
            contents,
            is_striked,
        });
    }

    // Commit recomputed counts, rejecting any zero before anything is
    // visible to the caller.
    for context in &mut contexts {
        let (block_count, sub_block_count) =
            context_counts.get(&context.id).copied().unwrap_or((0, 0));
        if block_count == 0 || sub_block_count == 0 {
            return Err(SnapshotError::EmptyContext {
                context_id: context.id.clone(),
            });
        }
        context.block_count = block_count;
        context.sub_block_count = sub_block_count;
    }
    for block in &mut blocks {
        let sub_block_count = block_counts.get(&block.id).copied().unwrap_or(0);
        if sub_block_count == 0 {
            return Err(SnapshotError::EmptyBlock {
                block_id: block.id.clone(),
            });
        }
        block.sub_block_count = sub_block_count;
    }

    Ok(Snapshot {
        mode: normalize_mode(raw_mode),
        contexts,
        blocks,
        sub_blocks,
    })
}

/// Normalizes a loosely-typed mode record.
///
/// `current_context` falls back to the seed id when absent; the theme is
/// coerced to a number defaulting to 0; edit icons default to shown.
pub(crate) fn normalize_mode(raw: RawMode) -> Mode {
    let current_context = match raw.current_context {
        Some(Value::String(id)) if !id.is_empty() => id,
        _ => FALLBACK_CONTEXT_ID.to_string(),
    };
    let current_theme = match raw.current_theme {
        Some(Value::Number(number)) => number.as_u64().unwrap_or(0) as u8,
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    };
    let show_edit_icons = match raw.show_edit_icons {
        Some(Value::Bool(flag)) => flag,
        _ => true,
    };

    Mode {
        show_edit_icons,
        current_context,
        current_theme,
    }
}

fn required_string(
    value: Option<&Value>,
    entity: EntityKind,
    field: &'static str,
) -> Result<String, SnapshotError> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
        _ => Err(SnapshotError::MissingField { entity, field }),
    }
}
