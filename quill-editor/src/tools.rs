// Drawing and text tools for the editor.

use egui::Color32;
use quill_core::{
    Document, HistoryError, HistoryItem, ImageSurface, Rectangle, TextEngine, TextHistoryItem,
    Workspace,
};
use tracing::{debug, info, trace, warn};

use crate::History;

pub const TEXT_ICON: &str = "Tools.Text.png";

pub trait Tool {
    fn apply(&self, surface: &mut ImageSurface, x: u32, y: u32);

    fn name(&self) -> &str;

    fn cursor_size(&self) -> u32 {
        1
    }
}

#[derive(Debug, Clone)]
pub struct Brush {
    pub size: u32,
    pub color: Color32,
}

impl Brush {
    pub fn new(size: u32, color: Color32) -> Self {
        Self { size, color }
    }
}

impl Tool for Brush {
    fn apply(&self, surface: &mut ImageSurface, x: u32, y: u32) {
        trace!(
            "Applying Brush at ({}, {}) with size {} and color {:?}",
            x,
            y,
            self.size,
            self.color
        );
        let half_size = self.size as i32 / 2;
        for dy in -half_size..=half_size {
            for dx in -half_size..=half_size {
                let px = x as i32 + dx;
                let py = y as i32 + dy;
                if px >= 0 && py >= 0 {
                    surface.set_pixel(px as u32, py as u32, self.color);
                }
            }
        }
    }

    fn name(&self) -> &str {
        "Brush"
    }

    fn cursor_size(&self) -> u32 {
        self.size
    }
}

/// Text editing on the current layer.
///
/// An edit session captures the layer before the first keystroke; committing
/// pushes that capture so a single undo reverts the whole session.
#[derive(Debug, Default)]
pub struct TextTool {
    editing: Option<TextHistoryItem>,
    changed: bool,
}

impl TextTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Start editing the current layer. Text typed into an empty engine starts
    /// at `origin`.
    pub fn begin_editing(
        &mut self,
        doc: &mut Document,
        origin: (i32, i32),
    ) -> Result<(), HistoryError> {
        if self.editing.is_some() {
            warn!("Text tool is already editing");
            return Ok(());
        }

        let layer = doc.current_user_layer();
        let item = TextHistoryItem::new(
            "Text",
            TEXT_ICON,
            layer.text_surface(),
            layer.surface(),
            layer,
        )?;
        info!("Begin text editing on layer {}", layer.id());

        let layer = doc.current_user_layer_mut();
        if layer.text_engine.is_empty() {
            layer.text_engine.origin = origin;
        }
        self.editing = Some(item);
        self.changed = false;
        Ok(())
    }

    // Edits go to the layer the session was captured from, even if another
    // layer became current in the meantime.
    fn edit(&mut self, doc: &mut Document, f: impl FnOnce(&mut TextEngine)) -> bool {
        let Some(target) = self.editing.as_ref().and_then(|item| item.target_layer()) else {
            debug!("Text input ignored, not editing");
            return false;
        };
        let Some((layer, workspace)) = doc.layer_and_workspace_mut(target) else {
            warn!("Text layer {} is gone, ending edit session", target);
            if let Some(mut item) = self.editing.take() {
                item.dispose();
            }
            self.changed = false;
            return false;
        };

        f(&mut layer.text_engine);
        layer.redraw_text();
        workspace.invalidate();
        self.changed = true;
        true
    }

    pub fn type_text(&mut self, doc: &mut Document, text: &str) -> bool {
        self.edit(doc, |engine| engine.insert_text(text))
    }

    pub fn backspace(&mut self, doc: &mut Document) -> bool {
        self.edit(doc, |engine| engine.perform_backspace())
    }

    pub fn enter(&mut self, doc: &mut Document) -> bool {
        self.edit(doc, |engine| engine.perform_enter())
    }

    /// Push the edit session onto `history`. Returns false if there was no
    /// session or nothing changed.
    pub fn commit(&mut self, history: &mut History) -> bool {
        let Some(mut item) = self.editing.take() else {
            return false;
        };

        if !self.changed {
            debug!("Text edit session made no changes, dropping it");
            item.dispose();
            return false;
        }

        history.push(Box::new(item));
        self.changed = false;
        true
    }

    /// Abandon the edit session and put the layer back as it was.
    pub fn cancel(&mut self, doc: &mut Document) {
        if let Some(mut item) = self.editing.take() {
            info!("Cancelling text edit");
            if self.changed {
                item.undo(doc);
            }
            item.dispose();
        }
        self.changed = false;
    }

    /// Burn the rendered text into the layer's pixels and reset the text
    /// engine, recording the change in `history`.
    pub fn finalize(
        &mut self,
        doc: &mut Document,
        history: &mut History,
    ) -> Result<(), HistoryError> {
        self.commit(history);

        let mut item = TextHistoryItem::empty("Finalize", TEXT_ICON);
        item.take_snapshot_of_layer(doc.current_user_layer())?;

        let layer = doc.current_user_layer_mut();
        info!("Finalizing text on layer {}", layer.id());
        let text = layer.text_surface().clone();
        for y in 0..text.height() {
            for x in 0..text.width() {
                if let Some(pixel) = text.get_pixel(x, y) {
                    if pixel.a() > 0 {
                        layer.surface_mut().set_pixel(x, y, pixel);
                    }
                }
            }
        }
        layer.text_surface_mut().clear();
        layer.text_engine.clear();
        layer.text_bounds = Rectangle::zero();
        doc.redraw.invalidate();

        history.push(Box::new(item));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brush() {
        let mut surface = ImageSurface::new(10, 10, Color32::WHITE);
        let brush = Brush::new(3, Color32::BLACK);

        brush.apply(&mut surface, 5, 5);

        for y in 4..=6 {
            for x in 4..=6 {
                assert_eq!(surface.get_pixel(x, y), Some(Color32::BLACK));
            }
        }
        assert_eq!(surface.get_pixel(3, 3), Some(Color32::WHITE));
    }

    #[test]
    fn brush_near_edge_clips() {
        let mut surface = ImageSurface::new(4, 4, Color32::WHITE);
        Brush::new(3, Color32::RED).apply(&mut surface, 0, 0);

        assert_eq!(surface.get_pixel(0, 0), Some(Color32::RED));
        assert_eq!(surface.get_pixel(1, 1), Some(Color32::RED));
        assert_eq!(surface.get_pixel(2, 2), Some(Color32::WHITE));
    }

    #[test]
    fn typing_without_session_is_ignored() {
        let mut doc = Document::new(16, 16);
        let mut tool = TextTool::new();
        assert!(!tool.type_text(&mut doc, "x"));
        assert!(doc.current_user_layer().text_engine.is_empty());
    }

    #[test]
    fn unchanged_session_is_not_committed() {
        let mut doc = Document::new(16, 16);
        let mut history = History::default();
        let mut tool = TextTool::new();

        tool.begin_editing(&mut doc, (0, 0)).unwrap();
        assert!(!tool.commit(&mut history));
        assert!(history.is_empty());
    }

    #[test]
    fn cancel_restores_layer() {
        let mut doc = Document::new(64, 16);
        let mut tool = TextTool::new();

        tool.begin_editing(&mut doc, (2, 2)).unwrap();
        tool.type_text(&mut doc, "oops");
        tool.cancel(&mut doc);

        let layer = doc.current_user_layer();
        assert!(!tool.is_editing());
        assert!(layer.text_engine.is_empty());
        assert!(layer.text_bounds.is_empty());
        assert!(layer
            .text_surface()
            .pixels()
            .iter()
            .all(|p| *p == Color32::TRANSPARENT));
    }
}
