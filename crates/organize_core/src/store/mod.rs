//! In-memory ordered entity stores and application state.
//!
//! # Responsibility
//! - Hold the three ordered collections plus the `Mode` singleton.
//! - Provide the set/add/update/delete contract used by services.
//! - Provide the pure reorder functions over scoped sub-sequences.
//!
//! # Invariants
//! - Store operations perform no validation; callers (the service layer and
//!   the import engine) guarantee invariants before committing.
//! - Insertion order is display order and is only changed by `set_all`.

pub mod entity_store;
pub mod reorder;
pub mod state;
