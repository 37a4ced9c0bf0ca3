//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations into user-action level operations.
//! - Keep every multi-collection cascade inside one synchronous call.
//!
//! # Invariants
//! - State is consistent at every operation boundary; persistence runs once
//!   per committed operation.

pub mod organize_service;
