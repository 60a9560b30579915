use egui::Color32;
use quill_core::{Document, HistoryItem, Rectangle, TextEngine, TextHistoryItem, UserLayer};

fn capture(doc: &Document) -> TextHistoryItem {
    let layer = doc.current_user_layer();
    TextHistoryItem::new(
        "Text",
        "Tools.Text",
        layer.text_surface(),
        layer.surface(),
        layer,
    )
    .unwrap()
}

fn set_state(layer: &mut UserLayer, fill: Color32, text: &str, bounds: Rectangle) {
    layer.surface_mut().fill(fill);
    layer.text_surface_mut().fill(fill);
    layer.text_engine = TextEngine::with_text(text);
    layer.text_bounds = bounds;
}

fn assert_state(layer: &UserLayer, fill: Color32, text: &str, bounds: Rectangle) {
    assert!(layer.surface().pixels().iter().all(|p| *p == fill));
    assert!(layer.text_surface().pixels().iter().all(|p| *p == fill));
    assert_eq!(layer.text_engine.text(), text);
    assert_eq!(layer.text_bounds, bounds);
}

#[test]
fn hello_world_undo_redo() {
    let mut doc = Document::new(100, 20);
    let before = Rectangle::new(0, 0, 50, 10);
    let after = Rectangle::new(0, 0, 90, 10);

    set_state(doc.current_user_layer_mut(), Color32::RED, "hello", before);
    let mut item = capture(&doc);

    set_state(doc.current_user_layer_mut(), Color32::BLUE, "hello world", after);

    item.undo(&mut doc);
    assert_state(doc.current_user_layer(), Color32::RED, "hello", before);

    item.redo(&mut doc);
    assert_state(doc.current_user_layer(), Color32::BLUE, "hello world", after);
}

#[test]
fn double_swap_restores_layer_exactly() {
    let mut doc = Document::new(40, 20);
    {
        let layer = doc.current_user_layer_mut();
        layer.text_engine.insert_text("first\nsecond");
        layer.text_engine.format.bold = true;
        layer.redraw_text();
        layer.surface_mut().set_pixel(3, 3, Color32::GREEN);
    }
    let mut item = capture(&doc);

    {
        let layer = doc.current_user_layer_mut();
        layer.text_engine.perform_backspace();
        layer.text_engine.format.bold = false;
        layer.redraw_text();
        layer.surface_mut().set_pixel(4, 4, Color32::YELLOW);
    }
    let surface = doc.current_user_layer().surface().clone();
    let text_surface = doc.current_user_layer().text_surface().clone();
    let engine = doc.current_user_layer().text_engine.clone();
    let bounds = doc.current_user_layer().text_bounds;

    item.undo(&mut doc);
    item.redo(&mut doc);

    let layer = doc.current_user_layer();
    assert_eq!(layer.surface(), &surface);
    assert_eq!(layer.text_surface(), &text_surface);
    assert_eq!(layer.text_engine, engine);
    assert_eq!(layer.text_bounds, bounds);
    assert_eq!(doc.redraw.invalidations(), 2);
}

#[test]
fn undo_then_redo_on_fresh_entry_is_noop() {
    let mut doc = Document::new(16, 16);
    set_state(
        doc.current_user_layer_mut(),
        Color32::WHITE,
        "abc",
        Rectangle::new(1, 2, 3, 4),
    );
    let mut item = capture(&doc);

    item.undo(&mut doc);
    assert_state(
        doc.current_user_layer(),
        Color32::WHITE,
        "abc",
        Rectangle::new(1, 2, 3, 4),
    );
    item.redo(&mut doc);
    assert_state(
        doc.current_user_layer(),
        Color32::WHITE,
        "abc",
        Rectangle::new(1, 2, 3, 4),
    );
}

#[test]
fn snapshots_are_isolated_from_live_layer() {
    let mut doc = Document::new(16, 16);
    set_state(
        doc.current_user_layer_mut(),
        Color32::RED,
        "kept",
        Rectangle::new(0, 0, 8, 8),
    );
    let item = capture(&doc);

    set_state(
        doc.current_user_layer_mut(),
        Color32::BLACK,
        "changed",
        Rectangle::new(2, 2, 10, 10),
    );
    doc.current_user_layer_mut().text_engine.format.font_size = 40;

    let stored = item.stored_user_surface().unwrap();
    assert!(stored.pixels().iter().all(|p| *p == Color32::RED));
    let stored = item.stored_text_surface().unwrap();
    assert!(stored.pixels().iter().all(|p| *p == Color32::RED));
    assert_eq!(item.stored_text_engine().unwrap().text(), "kept");
    assert_eq!(item.stored_text_engine().unwrap().format.font_size, 12);
    assert_eq!(item.stored_text_bounds(), Some(Rectangle::new(0, 0, 8, 8)));
}

#[test]
fn take_snapshot_matches_full_constructor() {
    let before = Rectangle::new(0, 0, 50, 10);
    let after = Rectangle::new(0, 0, 90, 10);

    let mut full_doc = Document::new(32, 32);
    set_state(full_doc.current_user_layer_mut(), Color32::RED, "hello", before);
    let mut full = capture(&full_doc);
    set_state(full_doc.current_user_layer_mut(), Color32::BLUE, "hello world", after);
    full.undo(&mut full_doc);

    let mut lazy_doc = Document::new(32, 32);
    set_state(lazy_doc.current_user_layer_mut(), Color32::RED, "hello", before);
    let mut lazy = TextHistoryItem::empty("Text", "Tools.Text");
    assert!(!lazy.is_populated());
    lazy.take_snapshot_of_layer(lazy_doc.current_user_layer())
        .unwrap();
    assert!(lazy.is_populated());
    set_state(lazy_doc.current_user_layer_mut(), Color32::BLUE, "hello world", after);
    lazy.undo(&mut lazy_doc);

    let a = full_doc.current_user_layer();
    let b = lazy_doc.current_user_layer();
    assert_eq!(a.surface(), b.surface());
    assert_eq!(a.text_surface(), b.text_surface());
    assert_eq!(a.text_engine, b.text_engine);
    assert_eq!(a.text_bounds, b.text_bounds);
}

#[test]
fn take_snapshot_overwrites_previous_payload() {
    let mut doc = Document::new(8, 8);
    set_state(doc.current_user_layer_mut(), Color32::RED, "old", Rectangle::zero());
    let mut item = capture(&doc);

    set_state(
        doc.current_user_layer_mut(),
        Color32::GREEN,
        "new",
        Rectangle::new(0, 0, 4, 4),
    );
    item.take_snapshot_of_layer(doc.current_user_layer()).unwrap();

    assert_eq!(item.stored_text_engine().unwrap().text(), "new");
    assert_eq!(item.stored_text_bounds(), Some(Rectangle::new(0, 0, 4, 4)));
}

#[test]
fn dispose_twice_and_dispose_empty() {
    let doc = Document::new(8, 8);
    let mut item = capture(&doc);
    assert!(item.memory_size() > 0);

    item.dispose();
    item.dispose();
    assert!(!item.is_populated());
    assert_eq!(item.memory_size(), 0);
    assert!(item.stored_user_surface().is_none());

    let mut empty = TextHistoryItem::empty("Text", "Tools.Text");
    empty.dispose();
    empty.dispose();
    assert_eq!(empty.memory_size(), 0);
}

#[test]
fn swap_leaves_layer_and_entry_with_separate_buffers() {
    let mut doc = Document::new(8, 8);
    set_state(doc.current_user_layer_mut(), Color32::RED, "a", Rectangle::zero());
    let mut item = capture(&doc);
    set_state(doc.current_user_layer_mut(), Color32::BLUE, "b", Rectangle::zero());

    item.undo(&mut doc);
    doc.current_user_layer_mut()
        .surface_mut()
        .fill(Color32::BLACK);

    // The entry now holds the pre-undo pixels and is unaffected by later paint.
    let stored = item.stored_user_surface().unwrap();
    assert!(stored.pixels().iter().all(|p| *p == Color32::BLUE));
}

#[test]
fn swap_targets_captured_layer_not_current_one() {
    let mut doc = Document::new(8, 8);
    let first = doc.current_user_layer().id();
    set_state(doc.current_user_layer_mut(), Color32::RED, "first", Rectangle::zero());
    let mut item = capture(&doc);
    set_state(doc.current_user_layer_mut(), Color32::BLUE, "edited", Rectangle::zero());

    doc.add_user_layer("Layer 2");
    item.undo(&mut doc);

    assert_eq!(doc.user_layer(first).unwrap().text_engine.text(), "first");
    assert!(doc.current_user_layer().text_engine.is_empty());
}

#[test]
#[should_panic(expected = "missing layer")]
fn undo_against_other_document_panics() {
    let doc = Document::new(8, 8);
    let mut item = capture(&doc);
    let mut other = Document::new(8, 8);
    item.undo(&mut other);
}
