//! Stored menu documents: round trips, version handling, migrations

use hearth_menus::codec::{
    decode, decode_paginated, decode_without_handlers, encode, encode_paginated, DocumentMigration, MigrationManager,
    PaginatedDocument, CURRENT_VERSION,
};
use hearth_menus::{
    handler, MenuDefinition, MenuDocument, MenuError, MenuLayout, MenuResult, NavBoundary, OverflowStrategy,
    PaginationState, PaginationTemplate, Slot,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn layout_menu() -> MenuDefinition {
    MenuLayout::new()
        .bind('B', Slot::new(0, "black_pane"))
        .bind('S', Slot::new(0, "sword").meta("damage", 7).meta("enchanted", true))
        .pattern(&["BBBBBBBBB", "B   S   B", "BBBBBBBBB"])
        .build("Armory")
        .unwrap()
}

#[test]
fn layout_survives_json_round_trip() {
    let menu = layout_menu();
    let text = encode(&menu).to_json().unwrap();
    let restored = decode_without_handlers(&MenuDocument::from_json(&text).unwrap()).unwrap();

    assert_eq!(restored.size(), 27);
    assert_eq!(restored.slot_count(), menu.slot_count());
    let sword = restored.get_slot(13).unwrap();
    assert_eq!(sword.payload().id(), "sword");
    assert_eq!(sword.get_meta("damage").and_then(|v| v.as_i64()), Some(7));
    assert_eq!(sword.get_meta("enchanted").and_then(|v| v.as_bool()), Some(true));

    assert_eq!(encode(&restored).to_json().unwrap(), text);
}

#[test]
fn handlers_are_never_written() {
    let mut menu = layout_menu();
    menu.set_slot(13, Slot::with_handler(13, "sword", |_| Ok(()))).unwrap();
    let text = encode(&menu).to_json().unwrap();

    let doc = MenuDocument::from_json(&text).unwrap();
    let rebuilt = decode(&doc, |stored| (stored.index == 13).then(|| handler(|_| Ok(())))).unwrap();
    assert!(rebuilt.get_slot(13).unwrap().has_handler());
    assert!(!rebuilt.get_slot(0).unwrap().has_handler());
}

#[test]
fn newer_documents_are_rejected() {
    let text = json!({
        "version": 9,
        "width": 9,
        "height": 1,
        "title": "Future",
        "slots": []
    })
    .to_string();

    match MenuDocument::from_json(&text) {
        Err(MenuError::UnsupportedVersion { found, supported }) => {
            assert_eq!(found, 9);
            assert_eq!(supported, 2);
        }
        other => panic!("expected version error, got {:?}", other),
    }
}

#[test]
fn version_one_documents_are_upgraded() {
    let text = json!({
        "version": 1,
        "title": "Old Shop",
        "rows": 2,
        "items": [
            {"slot": 0, "payload": "bread", "metadata": {"price": 3}},
            {"slot": 17, "payload": "cake"}
        ]
    })
    .to_string();

    let doc = MenuDocument::from_json(&text).unwrap();
    assert_eq!(doc.version, 2);
    assert_eq!((doc.width, doc.height), (9, 2));

    let menu = decode_without_handlers(&doc).unwrap();
    assert_eq!(menu.get_slot(17).unwrap().payload().id(), "cake");
    assert_eq!(
        menu.get_slot(0).unwrap().get_meta("price").and_then(|v| v.as_i64()),
        Some(3)
    );
}

struct RenameTitle;

impl DocumentMigration for RenameTitle {
    fn from_version(&self) -> u32 {
        0
    }

    fn to_version(&self) -> u32 {
        1
    }

    fn description(&self) -> &str {
        "Rename name to title"
    }

    fn apply(&self, document: &mut Map<String, Value>) -> MenuResult<()> {
        if let Some(name) = document.remove("name") {
            document.insert("title".to_string(), name);
        }
        Ok(())
    }
}

#[test]
fn custom_migrations_chain_with_builtin() {
    let mut migrations = MigrationManager::new();
    migrations.register(Box::new(RenameTitle)).unwrap();
    assert!(migrations.can_migrate(0, 2));

    let text = json!({"version": 0, "name": "Ancient", "rows": 1}).to_string();
    let doc = MenuDocument::from_json_with(&text, &migrations).unwrap();
    assert_eq!(doc.title.as_raw(), "Ancient");
    assert!(doc.slots.is_empty());
}

#[test]
fn out_of_grid_slots_fail_decoding() {
    let text = json!({
        "version": 2,
        "width": 9,
        "height": 1,
        "title": "Small",
        "slots": [{"index": 9, "payload": "overflow"}]
    })
    .to_string();

    let doc = MenuDocument::from_json(&text).unwrap();
    assert!(matches!(
        decode_without_handlers(&doc),
        Err(MenuError::OutOfBounds { index: 9, .. })
    ));
}

#[test]
fn unknown_fields_survive_decode_and_encode() {
    let text = json!({
        "version": 2,
        "width": 9,
        "height": 1,
        "title": "Shop",
        "slots": [{"index": 4, "payload": "emerald", "amount": 3, "tags": ["rare"]}],
        "theme": {"accent": "gold"}
    })
    .to_string();

    let doc = MenuDocument::from_json(&text).unwrap();
    let menu = decode_without_handlers(&doc).unwrap();
    assert_eq!(menu.get_slot(4).unwrap().extra().get("amount"), Some(&json!(3)));

    let again = encode(&menu);
    assert_eq!(again.extra.get("theme"), Some(&json!({"accent": "gold"})));
    assert_eq!(again.slots[0].extra.get("tags"), Some(&json!(["rare"])));
    assert_eq!(again, doc);
    assert_eq!(again.to_json().unwrap(), doc.to_json().unwrap());
}

#[test]
fn decode_rejects_documents_built_outside_from_json() {
    let value = json!({
        "version": CURRENT_VERSION + 1,
        "width": 9,
        "height": 1,
        "title": "Future"
    });
    let doc: MenuDocument = serde_json::from_value(value).unwrap();
    assert!(matches!(
        decode_without_handlers(&doc),
        Err(MenuError::UnsupportedVersion { .. })
    ));
}

#[test]
fn huge_unsigned_metadata_is_stable() {
    let text = json!({
        "version": 2,
        "width": 9,
        "height": 1,
        "title": "Ids",
        "slots": [{"index": 0, "payload": "token", "metadata": {"id": u64::MAX}}]
    })
    .to_string();

    let first = encode(&decode_without_handlers(&MenuDocument::from_json(&text).unwrap()).unwrap())
        .to_json()
        .unwrap();
    assert!(first.contains("18446744073709551615"));
    let second = encode(&decode_without_handlers(&MenuDocument::from_json(&first).unwrap()).unwrap())
        .to_json()
        .unwrap();
    assert_eq!(first, second);
}

fn catalog() -> PaginationTemplate {
    let mut base = MenuDefinition::chest("Catalog", 3).unwrap();
    base.fill(18..27, &Slot::new(0, "black_pane")).unwrap();
    PaginationTemplate::builder(base)
        .static_rows(&[2])
        .previous_button(18, Slot::new(0, "arrow_left"))
        .next_button(26, Slot::new(0, "arrow_right").meta("sound", "click"))
        .items((0..40).map(|i| Slot::new(0, format!("item-{}", i)).meta("price", i)).collect())
        .overflow(OverflowStrategy::Truncate)
        .fixed_pages(4)
        .boundary(NavBoundary::Inert)
        .build()
        .unwrap()
}

#[test]
fn paginated_templates_round_trip() {
    let template = catalog();
    let text = encode_paginated(&template).to_json().unwrap();

    let doc = PaginatedDocument::from_json(&text).unwrap();
    let rebuilt = decode_paginated(&doc, |stored| {
        (stored.payload == "item-0").then(|| handler(|ctx| {
            ctx.close();
            Ok(())
        }))
    })
    .unwrap();

    assert_eq!(rebuilt.page_count(), 4);
    assert_eq!(rebuilt.capacity(), template.capacity());
    assert_eq!(rebuilt.boundary(), NavBoundary::Inert);
    assert_eq!(rebuilt.overflow(), OverflowStrategy::Truncate);
    assert!(rebuilt.items()[0].has_handler());
    assert_eq!(encode_paginated(&rebuilt).to_json().unwrap(), text);

    let mut state = PaginationState::new(Arc::new(rebuilt), 0).unwrap();
    let page = state.next().unwrap();
    assert_eq!(page.get_slot(0).unwrap().payload().id(), "item-18");
    assert!(page.get_slot(18).unwrap().has_handler());
    assert_eq!(
        page.get_slot(26).unwrap().get_meta("sound").and_then(|v| v.as_str()),
        Some("click")
    );
}

#[test]
fn paginated_documents_check_version() {
    let mut doc = encode_paginated(&catalog());
    doc.version = CURRENT_VERSION + 1;
    assert!(matches!(
        decode_paginated(&doc, |_| None),
        Err(MenuError::UnsupportedVersion { .. })
    ));
}
