// Headless driver: type text on a layer, then walk the history back and forth.
//
// Usage: quill [config.json]

use anyhow::Context;
use egui::Color32;
use quill_core::Document;
use quill_editor::{load_config, logging, Brush, EditorConfig, History, TextTool, Tool};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path).with_context(|| format!("load config {path}"))?,
        None => EditorConfig::default(),
    };
    logging::init(&config.log_filter);

    let mut doc = Document::new(config.canvas_width, config.canvas_height);
    let mut history = History::new(&config.history);
    let mut tool = TextTool::new();

    Brush::new(5, Color32::LIGHT_BLUE).apply(doc.current_user_layer_mut().surface_mut(), 4, 4);

    tool.begin_editing(&mut doc, (10, 10))
        .context("start text edit")?;
    tool.type_text(&mut doc, "hello");
    tool.commit(&mut history);

    tool.begin_editing(&mut doc, (10, 10))
        .context("continue text edit")?;
    tool.type_text(&mut doc, " world");
    tool.commit(&mut history);

    let report = |doc: &Document, step: &str| {
        let layer = doc.current_user_layer();
        info!(
            "{step}: text {:?}, bounds {:?}",
            layer.text_engine.text(),
            layer.text_bounds
        );
    };

    report(&doc, "edited");
    history.undo(&mut doc);
    report(&doc, "undo");
    history.undo(&mut doc);
    report(&doc, "undo");
    history.redo(&mut doc);
    report(&doc, "redo");

    tool.finalize(&mut doc, &mut history)
        .context("finalize text")?;
    report(&doc, "finalized");

    info!(
        "{} history items holding {} bytes, {} redraws requested",
        history.len(),
        history.memory_size(),
        doc.redraw.invalidations()
    );
    Ok(())
}
