//! Sub-block content projections.
//!
//! # Responsibility
//! - Split stored contents into text and link-marker segments for display.
//!
//! # Invariants
//! - Stored contents are never rewritten; parsing is a read-only view.

pub mod links;

pub use links::{parse_link_markers, ContentSegment};
