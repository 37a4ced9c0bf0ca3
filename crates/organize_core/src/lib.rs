//! Core state model for Organize.
//! This crate is the single source of truth for business invariants.

pub mod content;
pub mod logging;
pub mod model;
pub mod persist;
pub mod service;
pub mod snapshot;
pub mod store;

pub use content::{parse_link_markers, ContentSegment};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entity::{
    Block, Context, ContextValidationError, Entity, EntityId, Mode, SubBlock,
    MAX_CONTEXT_NAME_CHARS,
};
pub use persist::{
    FileStorage, MemoryStorage, StorageAdapter, StorageError, StorageKey, StorageResult,
};
pub use service::organize_service::{OrganizeService, ServiceError};
pub use snapshot::{
    export_file_name, export_json, import_snapshot, EntityKind, Snapshot, SnapshotError,
};
pub use store::reorder::Direction;
pub use store::state::AppState;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
