//! Pure reorder functions over scoped sub-sequences.
//!
//! # Responsibility
//! - Compute a new full ordering with exactly two positions exchanged.
//! - Keep interleaved entities of other parents untouched.
//!
//! # Invariants
//! - Output length and id set always equal the input's.
//! - `swap_items` locates both entities by id, never by raw index into the
//!   full array: blocks and sub-blocks of different parents share one flat
//!   array, so a raw positional swap inside the scoped view would corrupt
//!   unrelated entities' order.
//! - Out-of-range swaps are a programming error: fatal in debug builds,
//!   input returned unchanged in release builds.

use crate::model::entity::{Context, Entity};

/// Reorder direction within a scoped list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Swap with the previous scoped neighbor; requires `index > 0`.
    Up,
    /// Swap with the next scoped neighbor; requires `index < len - 1`.
    Down,
}

/// Swaps a context with its neighbor in the full context array.
///
/// Contexts have no parent scope, so the swap is positional.
pub fn swap_contexts(contexts: &[Context], index: usize, direction: Direction) -> Vec<Context> {
    let mut items = contexts.to_vec();
    match neighbor_index(index, items.len(), direction) {
        Some(neighbor) => items.swap(index, neighbor),
        None => {
            debug_assert!(
                false,
                "context swap out of range: index {index} {direction:?} in {} items",
                items.len()
            );
        }
    }
    items
}

/// Swaps a scoped entity with its scoped neighbor inside the full array.
///
/// `scoped` is the ordered subsequence of `all` sharing one parent; `index`
/// addresses the moving entity within `scoped`. The two records exchange
/// the positions they previously occupied in `all`; every other element is
/// carried over unchanged.
pub fn swap_items<T: Entity + Clone>(
    scoped: &[T],
    all: &[T],
    index: usize,
    direction: Direction,
) -> Vec<T> {
    let Some(neighbor) = neighbor_index(index, scoped.len(), direction) else {
        debug_assert!(
            false,
            "scoped swap out of range: index {index} {direction:?} in {} items",
            scoped.len()
        );
        return all.to_vec();
    };

    let moving = &scoped[index];
    let displaced = &scoped[neighbor];

    all.iter()
        .map(|item| {
            if item.id() == moving.id() {
                displaced.clone()
            } else if item.id() == displaced.id() {
                moving.clone()
            } else {
                item.clone()
            }
        })
        .collect()
}

fn neighbor_index(index: usize, len: usize, direction: Direction) -> Option<usize> {
    if index >= len {
        return None;
    }
    match direction {
        Direction::Up if index > 0 => Some(index - 1),
        Direction::Down if index + 1 < len => Some(index + 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{neighbor_index, Direction};

    #[test]
    fn neighbor_index_respects_bounds() {
        assert_eq!(neighbor_index(0, 3, Direction::Up), None);
        assert_eq!(neighbor_index(1, 3, Direction::Up), Some(0));
        assert_eq!(neighbor_index(2, 3, Direction::Down), None);
        assert_eq!(neighbor_index(1, 3, Direction::Down), Some(2));
        assert_eq!(neighbor_index(3, 3, Direction::Up), None);
    }
}
