//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `organize_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use organize_core::AppState;

fn main() {
    let state = AppState::initial();
    println!("organize_core version={}", organize_core::core_version());
    println!(
        "organize_core seed contexts={} blocks={} sub_blocks={} current_context={}",
        state.contexts.len(),
        state.blocks.len(),
        state.sub_blocks.len(),
        state.mode.current_context
    );
}
