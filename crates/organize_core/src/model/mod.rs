//! Domain model for the context/block/sub-block hierarchy.
//!
//! # Responsibility
//! - Define the canonical records shared by stores, services and snapshots.
//! - Keep serialized field names identical to the persisted wire format.
//!
//! # Invariants
//! - Every entity carries a stable opaque string id, unique within its
//!   collection; ids are only reused by the initial seed data.
//! - Cached descendant counts on `Context` and `Block` always mirror live
//!   membership after any public service operation.

pub mod entity;
