use organize_core::{
    Block, Context, ContextValidationError, Mode, SubBlock, MAX_CONTEXT_NAME_CHARS,
};

#[test]
fn new_context_seeds_counts_for_its_first_block_and_sub_block() {
    let context = Context::new("Work");

    assert!(!context.id.is_empty());
    assert_eq!(context.name, "Work");
    assert_eq!(context.block_count, 1);
    assert_eq!(context.sub_block_count, 1);
}

#[test]
fn new_entities_get_distinct_ids() {
    let first = Context::new("A");
    let second = Context::new("B");
    assert_ne!(first.id, second.id);
}

#[test]
fn new_block_and_sub_block_reference_their_parents() {
    let context = Context::new("Work");
    let block = Block::new("Tasks", context.id.clone());
    let sub_block = SubBlock::new("Buy milk", block.id.clone());

    assert_eq!(block.context, context.id);
    assert_eq!(block.sub_block_count, 1);
    assert_eq!(sub_block.block, block.id);
    assert_eq!(sub_block.contents, "");
    assert!(!sub_block.is_striked);
}

#[test]
fn context_name_bound_is_one_to_twenty_eight_characters() {
    assert!(Context::validate_name("A").is_ok());
    assert!(Context::validate_name(&"x".repeat(MAX_CONTEXT_NAME_CHARS)).is_ok());

    assert_eq!(
        Context::validate_name(""),
        Err(ContextValidationError::NameEmpty)
    );
    assert_eq!(
        Context::validate_name(&"x".repeat(29)),
        Err(ContextValidationError::NameTooLong { length: 29 })
    );
}

#[test]
fn context_name_bound_counts_characters_not_bytes() {
    // 28 multibyte characters must pass even though the byte length is larger.
    let name = "ü".repeat(MAX_CONTEXT_NAME_CHARS);
    assert!(Context::validate_name(&name).is_ok());
}

#[test]
fn entities_serialize_with_camel_case_wire_fields() {
    let context = Context::new("Work");
    let json = serde_json::to_value(&context).unwrap();
    assert!(json.get("blockCount").is_some());
    assert!(json.get("subBlockCount").is_some());
    assert!(json.get("block_count").is_none());

    let sub_block = SubBlock::new("Item", "b1");
    let json = serde_json::to_value(&sub_block).unwrap();
    assert!(json.get("isStriked").is_some());

    let mode = Mode::default();
    let json = serde_json::to_value(&mode).unwrap();
    assert!(json.get("showEditIcons").is_some());
    assert!(json.get("currentContext").is_some());
    assert!(json.get("currentTheme").is_some());
}

#[test]
fn entities_round_trip_through_wire_json() {
    let block = Block {
        id: "b1".to_string(),
        name: "Tasks".to_string(),
        context: "c1".to_string(),
        sub_block_count: 3,
    };

    let text = serde_json::to_string(&block).unwrap();
    let back: Block = serde_json::from_str(&text).unwrap();
    assert_eq!(back, block);
}

#[test]
fn default_mode_shows_icons_on_the_seed_context_in_light_theme() {
    let mode = Mode::default();
    assert!(mode.show_edit_icons);
    assert_eq!(mode.current_context, "0");
    assert_eq!(mode.current_theme, 0);
}
