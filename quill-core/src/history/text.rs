//! History entry for text created, edited or finalized on a user layer.
//!
//! The entry stores both surfaces of the layer (the rendered text sub-surface
//! and the layer's own pixels) together with the text engine and its bounds.
//! Undo and redo are the same operation: every stored value is exchanged with
//! the live value on the layer, so applying it twice is a no-op.

use std::mem;

use tracing::{debug, error, trace};
use uuid::Uuid;

use crate::{
    Document, HistoryError, HistoryItem, ImageSurface, Rectangle, TextEngine, UserLayer, Workspace,
};

#[derive(Debug)]
struct TextSnapshot {
    text_surface: ImageSurface,
    user_surface: ImageSurface,
    text_engine: TextEngine,
    text_bounds: Rectangle,
}

#[derive(Debug)]
enum Payload {
    Empty,
    Populated {
        layer: Uuid,
        snapshot: Box<TextSnapshot>,
    },
}

#[derive(Debug)]
pub struct TextHistoryItem {
    label: String,
    icon: String,
    payload: Payload,
}

fn check_surface(what: &'static str, surface: &ImageSurface) -> Result<(), HistoryError> {
    if surface.is_disposed() {
        return Err(HistoryError::invalid(what, "surface has been released"));
    }
    if surface.is_empty_geometry() {
        return Err(HistoryError::invalid(what, "surface has no pixels"));
    }
    Ok(())
}

fn check_geometry(
    what: &'static str,
    stored: &ImageSurface,
    live: &ImageSurface,
) -> Result<(), HistoryError> {
    if !stored.same_geometry(live) {
        return Err(HistoryError::invalid(
            what,
            format!(
                "surface is {}x{} but the layer's is {}x{}",
                stored.width(),
                stored.height(),
                live.width(),
                live.height()
            ),
        ));
    }
    Ok(())
}

impl TextHistoryItem {
    /// Capture an entry from explicit surfaces plus the layer's current text
    /// state. Both surfaces are copied.
    pub fn new(
        label: impl Into<String>,
        icon: impl Into<String>,
        text_surface: &ImageSurface,
        user_surface: &ImageSurface,
        layer: &UserLayer,
    ) -> Result<Self, HistoryError> {
        check_surface("text_surface", text_surface)?;
        check_surface("user_surface", user_surface)?;
        check_surface("layer.text_surface", layer.text_surface())?;
        check_surface("layer.surface", layer.surface())?;
        check_geometry("text_surface", text_surface, layer.text_surface())?;
        check_geometry("user_surface", user_surface, layer.surface())?;

        let label = label.into();
        debug!("Capturing text history item {:?} for layer {}", label, layer.id());

        Ok(Self {
            label,
            icon: icon.into(),
            payload: Payload::Populated {
                layer: layer.id(),
                snapshot: Box::new(TextSnapshot {
                    text_surface: text_surface.clone(),
                    user_surface: user_surface.clone(),
                    text_engine: layer.text_engine.clone(),
                    text_bounds: layer.text_bounds,
                }),
            },
        })
    }

    /// An entry without a payload. It must be filled with
    /// [`take_snapshot_of_layer`](Self::take_snapshot_of_layer) before use.
    pub fn empty(label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
            payload: Payload::Empty,
        }
    }

    /// Replace the payload with a copy of the layer's current state.
    pub fn take_snapshot_of_layer(&mut self, layer: &UserLayer) -> Result<(), HistoryError> {
        check_surface("layer.text_surface", layer.text_surface())?;
        check_surface("layer.surface", layer.surface())?;

        self.dispose();
        debug!("Taking snapshot of layer {} for {:?}", layer.id(), self.label);

        self.payload = Payload::Populated {
            layer: layer.id(),
            snapshot: Box::new(TextSnapshot {
                text_surface: layer.text_surface().clone(),
                user_surface: layer.surface().clone(),
                text_engine: layer.text_engine.clone(),
                text_bounds: layer.text_bounds,
            }),
        };
        Ok(())
    }

    pub fn is_populated(&self) -> bool {
        matches!(self.payload, Payload::Populated { .. })
    }

    /// The layer this entry was captured from.
    pub fn target_layer(&self) -> Option<Uuid> {
        match &self.payload {
            Payload::Populated { layer, .. } => Some(*layer),
            Payload::Empty => None,
        }
    }

    fn snapshot(&self) -> Option<&TextSnapshot> {
        match &self.payload {
            Payload::Populated { snapshot, .. } => Some(&**snapshot),
            Payload::Empty => None,
        }
    }

    pub fn stored_text_surface(&self) -> Option<&ImageSurface> {
        self.snapshot().map(|s| &s.text_surface)
    }

    pub fn stored_user_surface(&self) -> Option<&ImageSurface> {
        self.snapshot().map(|s| &s.user_surface)
    }

    pub fn stored_text_engine(&self) -> Option<&TextEngine> {
        self.snapshot().map(|s| &s.text_engine)
    }

    pub fn stored_text_bounds(&self) -> Option<Rectangle> {
        self.snapshot().map(|s| s.text_bounds)
    }

    /// Exchange the stored state with the layer's live state.
    ///
    /// # Panics
    ///
    /// If the entry was never populated or `layer` is not the layer it was
    /// captured from.
    pub fn swap(&mut self, layer: &mut UserLayer, workspace: &mut dyn Workspace) {
        let (target, snapshot) = match &mut self.payload {
            Payload::Populated {
                layer: target,
                snapshot,
            } => (*target, snapshot),
            Payload::Empty => {
                error!("Swap on unpopulated text history item {:?}", self.label);
                panic!("text history item {:?} swapped before being populated", self.label);
            }
        };
        if target != layer.id() {
            error!(
                "Text history item {:?} captured from {} swapped onto {}",
                self.label,
                target,
                layer.id()
            );
            panic!("text history item {:?} swapped onto the wrong layer", self.label);
        }

        trace!("Swapping surfaces of layer {}", target);
        mem::swap(layer.text_surface_mut(), &mut snapshot.text_surface);
        mem::swap(layer.surface_mut(), &mut snapshot.user_surface);

        // Both surfaces changed, so every cached composite is stale.
        workspace.invalidate();

        trace!("Swapping text engine and bounds of layer {}", target);
        mem::swap(&mut layer.text_engine, &mut snapshot.text_engine);
        mem::swap(&mut layer.text_bounds, &mut snapshot.text_bounds);
    }

    fn swap_in(&mut self, doc: &mut Document) {
        let Some(target) = self.target_layer() else {
            error!("Swap on unpopulated text history item {:?}", self.label);
            panic!("text history item {:?} swapped before being populated", self.label);
        };
        let Some((layer, workspace)) = doc.layer_and_workspace_mut(target) else {
            error!("Layer {} of text history item {:?} is gone", target, self.label);
            panic!("text history item {:?} targets a missing layer", self.label);
        };
        self.swap(layer, workspace);
    }
}

impl HistoryItem for TextHistoryItem {
    fn label(&self) -> &str {
        &self.label
    }

    fn icon(&self) -> &str {
        &self.icon
    }

    fn undo(&mut self, doc: &mut Document) {
        debug!("Undo {:?}", self.label);
        self.swap_in(doc);
    }

    fn redo(&mut self, doc: &mut Document) {
        debug!("Redo {:?}", self.label);
        self.swap_in(doc);
    }

    fn dispose(&mut self) {
        let payload = mem::replace(&mut self.payload, Payload::Empty);
        if let Payload::Populated { mut snapshot, .. } = payload {
            trace!("Releasing surfaces of {:?}", self.label);
            snapshot.text_surface.dispose();
            snapshot.user_surface.dispose();
        }
    }

    fn memory_size(&self) -> usize {
        self.snapshot().map_or(0, |s| {
            s.text_surface.memory_size() + s.user_surface.memory_size()
        })
    }
}

impl Drop for TextHistoryItem {
    fn drop(&mut self) {
        self.dispose();
    }
}
