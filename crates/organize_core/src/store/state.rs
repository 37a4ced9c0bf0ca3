//! Full application state and its seed data.
//!
//! # Responsibility
//! - Bundle the three entity stores and the `Mode` singleton.
//! - Provide parent-scoped read helpers for services and rendering.
//!
//! # Invariants
//! - The seed state satisfies every count invariant (one context, one
//!   block, one sub-block) and `Mode.current_context` references it.
//! - Seed entities reuse the fixed id `"0"`; all later ids are random.

use crate::model::entity::{Block, Context, Mode, SubBlock};
use crate::store::entity_store::EntityStore;

const SEED_ID: &str = "0";
const SEED_CONTENTS: &str = "Here, you can write notes for an item.\n\
[You can also add links that open to a new page](https://example.com)\n\
Click on an item title to strike it out, and click the edit or plus buttons \
to modify or add new content respectively.";

/// Complete in-memory state of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// View settings singleton.
    pub mode: Mode,
    /// Ordered contexts.
    pub contexts: EntityStore<Context>,
    /// Ordered blocks for all contexts, interleaved in one flat array.
    pub blocks: EntityStore<Block>,
    /// Ordered sub-blocks for all blocks, interleaved in one flat array.
    pub sub_blocks: EntityStore<SubBlock>,
}

impl AppState {
    /// Builds the first-run seed state.
    pub fn initial() -> Self {
        let context = Context {
            id: SEED_ID.to_string(),
            name: "Default Context".to_string(),
            block_count: 1,
            sub_block_count: 1,
        };
        let block = Block {
            id: SEED_ID.to_string(),
            name: "Example Section".to_string(),
            context: SEED_ID.to_string(),
            sub_block_count: 1,
        };
        let sub_block = SubBlock {
            id: SEED_ID.to_string(),
            name: "Example Item".to_string(),
            block: SEED_ID.to_string(),
            contents: SEED_CONTENTS.to_string(),
            is_striked: false,
        };

        Self {
            mode: Mode::default(),
            contexts: EntityStore::new(vec![context]),
            blocks: EntityStore::new(vec![block]),
            sub_blocks: EntityStore::new(vec![sub_block]),
        }
    }

    /// Returns the ordered blocks owned by one context.
    pub fn blocks_in(&self, context_id: &str) -> Vec<Block> {
        self.blocks
            .items()
            .iter()
            .filter(|block| block.context == context_id)
            .cloned()
            .collect()
    }

    /// Returns the ordered sub-blocks owned by one block.
    pub fn sub_blocks_in(&self, block_id: &str) -> Vec<SubBlock> {
        self.sub_blocks
            .items()
            .iter()
            .filter(|sub_block| sub_block.block == block_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;

    #[test]
    fn seed_state_satisfies_count_invariants() {
        let state = AppState::initial();

        let context = state.contexts.find("0").unwrap();
        assert_eq!(context.block_count, 1);
        assert_eq!(context.sub_block_count, 1);
        assert_eq!(state.blocks_in("0").len(), 1);
        assert_eq!(state.sub_blocks_in("0").len(), 1);
        assert_eq!(state.mode.current_context, context.id);
    }
}
