//! Paged shop driven end to end through the engine facade

mod common;

use common::{init_logging, RecordingHost};
use hearth_menus::menu::filler::{fill_side, row_indices};
use hearth_menus::menu::Side;
use hearth_menus::{
    ClickEvent, DispatchOutcome, MenuConfig, MenuDefinition, MenuEngine, MenuSource, NavBoundary, Slot,
    ViewId,
};
use parking_lot::Mutex;
use std::sync::Arc;

const PREVIOUS: usize = 45;
const NEXT: usize = 53;

fn shop_engine(config: MenuConfig, items: usize) -> (Arc<RecordingHost>, MenuEngine, ViewId) {
    init_logging();
    let host = Arc::new(RecordingHost::default());
    let engine = MenuEngine::new(host.clone(), config);

    let mut base = MenuDefinition::chest("Shop", 6).unwrap();
    fill_side(&mut base, Side::Top, &Slot::new(0, "header")).unwrap();
    let template = engine
        .paginate(base)
        .static_rows(&[0, 5])
        .previous_button(PREVIOUS, Slot::new(0, "arrow_left"))
        .next_button(NEXT, Slot::new(0, "arrow_right"))
        .items((0..items).map(|i| Slot::new(0, format!("item-{}", i))).collect())
        .build()
        .unwrap();

    let view = ViewId::new("shopper");
    engine.open(view.clone(), template).unwrap();
    (host, engine, view)
}

fn content(engine: &MenuEngine, view: &ViewId) -> Vec<Option<String>> {
    let menu = engine.registry().lookup(view).unwrap().definition();
    (9..45)
        .map(|i| menu.get_slot(i).map(|s| s.payload().id().to_string()))
        .collect()
}

#[test]
fn hundred_items_walk_to_last_page() {
    let (host, engine, view) = shop_engine(MenuConfig::default(), 100);
    let instance = engine.registry().lookup(&view).unwrap();
    assert_eq!(instance.page_count(), 3);

    assert_eq!(engine.handle_click(ClickEvent::new(view.clone(), PREVIOUS)), DispatchOutcome::Absorbed);
    assert_eq!(engine.handle_click(ClickEvent::new(view.clone(), NEXT)), DispatchOutcome::Handled);
    assert_eq!(engine.handle_click(ClickEvent::new(view.clone(), NEXT)), DispatchOutcome::Handled);
    assert_eq!(instance.current_page(), 2);

    let cells = content(&engine, &view);
    let filled: Vec<&String> = cells.iter().flatten().collect();
    assert_eq!(filled.len(), 28);
    assert_eq!(filled[0], "item-72");
    assert_eq!(filled[27], "item-99");
    assert_eq!(cells.iter().filter(|c| c.is_none()).count(), 8);

    let page = instance.definition();
    assert!(row_indices(9, 0).into_iter().all(|i| page.get_slot(i).unwrap().payload().id() == "header"));
    assert!(page.get_slot(NEXT).is_none());
    assert_eq!(engine.handle_click(ClickEvent::new(view.clone(), NEXT)), DispatchOutcome::Absorbed);

    assert_eq!(engine.handle_click(ClickEvent::new(view.clone(), PREVIOUS)), DispatchOutcome::Handled);
    assert_eq!(instance.current_page(), 1);
    assert_eq!(content(&engine, &view)[0].as_deref(), Some("item-36"));

    assert_eq!(host.full_renders(&view), 4);
}

#[test]
fn page_generations_keep_increasing() {
    let (_host, engine, view) = shop_engine(MenuConfig::default(), 100);
    let instance = engine.registry().lookup(&view).unwrap();

    let mut last = instance.generation();
    for target in [NEXT, NEXT, PREVIOUS, PREVIOUS] {
        engine.handle_click(ClickEvent::new(view.clone(), target));
        assert!(instance.generation() > last);
        last = instance.generation();
    }
}

#[test]
fn inert_boundary_from_config() {
    let config = MenuConfig::from_toml_str("[pagination]\nboundary = \"inert\"").unwrap();
    assert_eq!(config.pagination.boundary, NavBoundary::Inert);
    let (_host, engine, view) = shop_engine(config, 10);

    let page = engine.registry().lookup(&view).unwrap().definition();
    assert!(!page.get_slot(PREVIOUS).unwrap().has_handler());
    assert!(!page.get_slot(NEXT).unwrap().has_handler());
    assert_eq!(engine.handle_click(ClickEvent::new(view.clone(), NEXT)), DispatchOutcome::Absorbed);
}

#[test]
fn handler_replaces_items_and_clamps_page() {
    let (_host, engine, view) = shop_engine(MenuConfig::default(), 100);
    let instance = engine.registry().lookup(&view).unwrap();
    instance.go_to_page(2).unwrap();

    instance
        .set_slot(
            49,
            Slot::with_handler(49, "clear_filter", |ctx| {
                ctx.set_items(vec![Slot::new(0, "only")])?;
                Ok(())
            }),
        )
        .unwrap();

    assert_eq!(engine.handle_click(ClickEvent::new(view.clone(), 49)), DispatchOutcome::Handled);
    assert_eq!(instance.current_page(), 0);
    assert_eq!(instance.page_count(), 1);
    assert_eq!(content(&engine, &view)[0].as_deref(), Some("only"));
}

#[test]
fn failed_navigation_keeps_page() {
    let (host, engine, view) = shop_engine(MenuConfig::default(), 100);
    let instance = engine.registry().lookup(&view).unwrap();
    instance
        .set_slot(
            49,
            Slot::with_handler(49, "jump", |ctx| {
                ctx.next_page()?;
                ctx.go_to_page(7)?;
                Ok(())
            }),
        )
        .unwrap();
    host.clear();

    assert_eq!(engine.handle_click(ClickEvent::new(view.clone(), 49)), DispatchOutcome::Failed);
    assert_eq!(instance.current_page(), 0);
    assert_eq!(host.full_renders(&view), 0);
    assert_eq!(content(&engine, &view)[0].as_deref(), Some("item-0"));
}

#[test]
fn page_change_hook_sees_transitions() {
    init_logging();
    let host = Arc::new(RecordingHost::default());
    let engine = MenuEngine::new(host, MenuConfig::default());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();

    let template = engine
        .paginate(MenuDefinition::chest("Hook", 2).unwrap())
        .static_rows(&[1])
        .next_button(17, Slot::new(0, "next"))
        .items((0..30).map(|i| Slot::new(0, format!("i{}", i))).collect())
        .on_page_change(move |change| sink.lock().push((change.from, change.to, change.page_count)))
        .build()
        .unwrap();

    let view = ViewId::new("hooked");
    engine.open(view.clone(), MenuSource::paginated(template, 1)).unwrap();
    engine.handle_click(ClickEvent::new(view.clone(), 17));
    assert_eq!(*seen.lock(), vec![(1, 2, 4)]);
}
