use organize_core::store::reorder::Direction;
use organize_core::{AppState, MemoryStorage, OrganizeService, ServiceError};

fn seeded_service() -> OrganizeService<MemoryStorage> {
    OrganizeService::with_state(AppState::initial(), MemoryStorage::new())
}

#[test]
fn add_context_creates_one_block_and_one_sub_block_with_it() {
    let mut service = seeded_service();

    let context = service.add_context();

    let state = service.state();
    assert_eq!(state.contexts.len(), 2);
    assert_eq!(context.block_count, 1);
    assert_eq!(context.sub_block_count, 1);

    let blocks = state.blocks_in(&context.id);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].name, "New Section");
    assert_eq!(blocks[0].sub_block_count, 1);

    let sub_blocks = state.sub_blocks_in(&blocks[0].id);
    assert_eq!(sub_blocks.len(), 1);
    assert_eq!(sub_blocks[0].name, "New Item");
}

#[test]
fn add_block_credits_both_cached_context_counts() {
    let mut service = seeded_service();

    let block = service.add_block("0").unwrap();

    let state = service.state();
    let context = state.contexts.find("0").unwrap();
    assert_eq!(context.block_count, 2);
    assert_eq!(context.sub_block_count, 2);
    assert_eq!(state.sub_blocks_in(&block.id).len(), 1);
}

#[test]
fn add_sub_block_credits_block_and_context_counts() {
    let mut service = seeded_service();

    service.add_sub_block("0").unwrap();

    let state = service.state();
    assert_eq!(state.blocks.find("0").unwrap().sub_block_count, 2);
    let context = state.contexts.find("0").unwrap();
    assert_eq!(context.block_count, 1);
    assert_eq!(context.sub_block_count, 2);
}

#[test]
fn cached_counts_always_match_actual_membership() {
    let mut service = seeded_service();

    let block = service.add_block("0").unwrap();
    service.add_sub_block(&block.id).unwrap();
    service.add_sub_block("0").unwrap();

    let state = service.state();
    let context = state.contexts.find("0").unwrap();
    assert_eq!(context.block_count as usize, state.blocks_in("0").len());

    let mut total_sub_blocks = 0;
    for owned in state.blocks_in("0") {
        let actual = state.sub_blocks_in(&owned.id).len();
        assert_eq!(owned.sub_block_count as usize, actual);
        total_sub_blocks += actual;
    }
    assert_eq!(context.sub_block_count as usize, total_sub_blocks);
}

#[test]
fn delete_sub_block_removes_an_emptied_block() {
    let mut service = seeded_service();
    let block = service.add_block("0").unwrap();
    let sub_blocks = service.state().sub_blocks_in(&block.id);

    service.delete_sub_block(&sub_blocks[0].id).unwrap();

    let state = service.state();
    assert!(state.blocks.find(&block.id).is_none());
    let context = state.contexts.find("0").unwrap();
    assert_eq!(context.block_count, 1);
    assert_eq!(context.sub_block_count, 1);
}

#[test]
fn delete_sub_block_keeps_a_block_that_still_has_items() {
    let mut service = seeded_service();
    let added = service.add_sub_block("0").unwrap();

    service.delete_sub_block(&added.id).unwrap();

    let state = service.state();
    let block = state.blocks.find("0").unwrap();
    assert_eq!(block.sub_block_count, 1);
    assert_eq!(state.contexts.find("0").unwrap().sub_block_count, 1);
}

#[test]
fn the_last_sub_block_of_the_only_block_cannot_be_deleted() {
    let mut service = seeded_service();

    let err = service.delete_sub_block("0").unwrap_err();
    assert!(matches!(err, ServiceError::LastBlock));

    // Nothing was mutated.
    let state = service.state();
    assert_eq!(state.blocks.len(), 1);
    assert_eq!(state.sub_blocks.len(), 1);
}

#[test]
fn emptying_a_block_is_allowed_once_the_context_has_another_block() {
    let mut service = seeded_service();
    service.add_block("0").unwrap();

    service.delete_sub_block("0").unwrap();

    assert!(service.state().blocks.find("0").is_none());
}

#[test]
fn delete_context_cascades_to_all_descendants() {
    let mut service = seeded_service();
    let context = service.add_context();
    let block = service.add_block(&context.id).unwrap();
    service.add_sub_block(&block.id).unwrap();

    service.delete_context(&context.id).unwrap();

    let state = service.state();
    assert!(state.contexts.find(&context.id).is_none());
    assert!(state.blocks_in(&context.id).is_empty());
    for sub_block in state.sub_blocks.items() {
        assert!(state.blocks.find(&sub_block.block).is_some());
    }
}

#[test]
fn deleting_the_active_context_reassigns_current_context() {
    let mut service = seeded_service();
    let context = service.add_context();
    service.set_current_context(&context.id).unwrap();

    service.delete_context(&context.id).unwrap();

    let state = service.state();
    assert_eq!(state.mode.current_context, "0");
    assert!(state.contexts.find(&state.mode.current_context).is_some());
}

#[test]
fn the_final_context_cannot_be_deleted() {
    let mut service = seeded_service();

    let err = service.delete_context("0").unwrap_err();
    assert!(matches!(err, ServiceError::LastContext));
    assert_eq!(service.state().contexts.len(), 1);
}

#[test]
fn rename_context_enforces_the_length_bound_without_mutating() {
    let mut service = seeded_service();

    service.rename_context("0", "Chores").unwrap();
    assert_eq!(service.state().contexts.find("0").unwrap().name, "Chores");

    let err = service.rename_context("0", &"x".repeat(29)).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(service.state().contexts.find("0").unwrap().name, "Chores");
}

#[test]
fn rename_block_carries_no_length_bound() {
    let mut service = seeded_service();
    let long_name = "x".repeat(120);

    service.rename_block("0", &long_name).unwrap();
    assert_eq!(service.state().blocks.find("0").unwrap().name, long_name);
}

#[test]
fn toggle_striked_flips_and_reports_the_new_state() {
    let mut service = seeded_service();

    assert!(service.toggle_striked("0").unwrap());
    assert!(service.state().sub_blocks.find("0").unwrap().is_striked);
    assert!(!service.toggle_striked("0").unwrap());
}

#[test]
fn update_sub_block_replaces_all_editable_fields() {
    let mut service = seeded_service();

    service
        .update_sub_block("0", "Retitle", "new contents", true)
        .unwrap();

    let sub_block = service.state().sub_blocks.find("0").unwrap();
    assert_eq!(sub_block.name, "Retitle");
    assert_eq!(sub_block.contents, "new contents");
    assert!(sub_block.is_striked);
}

#[test]
fn reorder_blocks_leaves_other_contexts_untouched() {
    let mut service = seeded_service();
    let other = service.add_context();
    let second = service.add_block("0").unwrap();
    let other_blocks = service.state().blocks_in(&other.id);

    service.reorder_blocks("0", 1, Direction::Up);

    let state = service.state();
    let reordered = state.blocks_in("0");
    assert_eq!(reordered[0].id, second.id);
    assert_eq!(reordered[1].id, "0");
    assert_eq!(state.blocks_in(&other.id), other_blocks);
}

#[test]
fn reorder_sub_blocks_swaps_within_one_block() {
    let mut service = seeded_service();
    let added = service.add_sub_block("0").unwrap();

    service.reorder_sub_blocks("0", 0, Direction::Down);

    let ordered = service.state().sub_blocks_in("0");
    assert_eq!(ordered[0].id, added.id);
    assert_eq!(ordered[1].id, "0");
}

#[test]
fn unknown_ids_are_reported_per_entity_kind() {
    let mut service = seeded_service();

    assert!(matches!(
        service.rename_context("missing", "x").unwrap_err(),
        ServiceError::ContextNotFound(_)
    ));
    assert!(matches!(
        service.add_sub_block("missing").unwrap_err(),
        ServiceError::BlockNotFound(_)
    ));
    assert!(matches!(
        service.toggle_striked("missing").unwrap_err(),
        ServiceError::SubBlockNotFound(_)
    ));
    assert!(matches!(
        service.set_current_context("missing").unwrap_err(),
        ServiceError::ContextNotFound(_)
    ));
}

#[test]
fn theme_and_edit_icon_settings_update_the_mode_singleton() {
    let mut service = seeded_service();

    service.set_theme(1);
    service.set_show_edit_icons(false);

    let mode = &service.state().mode;
    assert_eq!(mode.current_theme, 1);
    assert!(!mode.show_edit_icons);
    assert_eq!(mode.current_context, "0");
}
