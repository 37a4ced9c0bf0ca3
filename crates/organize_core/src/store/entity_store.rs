//! Generic ordered in-memory collection keyed by entity id.
//!
//! # Responsibility
//! - Implement the store contract shared by contexts, blocks and sub-blocks.
//!
//! # Invariants
//! - `update` is a full record replacement; callers re-send unchanged fields.
//! - `update`/`delete` are no-ops when the id is not present.

use crate::model::entity::Entity;

/// Ordered collection of entities with id-keyed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityStore<T> {
    items: Vec<T>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity + Clone> EntityStore<T> {
    /// Creates a store from an already-ordered list.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Replaces the entire collection verbatim.
    ///
    /// Used by reorder, import and cascade operations that compute a full
    /// new ordering; performs no validation.
    pub fn set_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Appends one entity to the end of insertion order.
    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    /// Replaces the entity with a matching id in place; no-op otherwise.
    pub fn update(&mut self, item: T) {
        if let Some(slot) = self.items.iter_mut().find(|entry| entry.id() == item.id()) {
            *slot = item;
        }
    }

    /// Removes the entity with a matching id; no-op otherwise.
    pub fn delete(&mut self, id: &str) {
        self.items.retain(|entry| entry.id() != id);
    }

    /// Returns the collection in display order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Finds one entity by id.
    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|entry| entry.id() == id)
    }

    /// Returns the number of stored entities.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::EntityStore;
    use crate::model::entity::SubBlock;

    fn sample(id: &str) -> SubBlock {
        SubBlock {
            id: id.to_string(),
            name: format!("item {id}"),
            block: "b1".to_string(),
            contents: String::new(),
            is_striked: false,
        }
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut store = EntityStore::default();
        store.add(sample("a"));
        store.add(sample("b"));
        store.add(sample("c"));

        let ids: Vec<_> = store.items().iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn update_replaces_full_record_in_place() {
        let mut store = EntityStore::new(vec![sample("a"), sample("b")]);
        let mut changed = sample("a");
        changed.name = "renamed".to_string();
        changed.is_striked = true;

        store.update(changed);

        let first = store.find("a").unwrap();
        assert_eq!(first.name, "renamed");
        assert!(first.is_striked);
        assert_eq!(store.items()[0].id, "a");
    }

    #[test]
    fn update_and_delete_are_noops_for_unknown_ids() {
        let mut store = EntityStore::new(vec![sample("a")]);

        store.update(sample("missing"));
        store.delete("missing");

        assert_eq!(store.len(), 1);
        assert!(store.find("a").is_some());
    }
}
