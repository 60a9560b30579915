//! Documents and the redraw collaborator that history entries poke.

use tracing::{debug, info};
use uuid::Uuid;

use crate::UserLayer;

/// Anything that can be asked to redraw the whole canvas.
pub trait Workspace {
    fn invalidate(&mut self);
}

/// Records full-redraw requests until the renderer picks them up.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RedrawTracker {
    invalidations: u64,
    dirty: bool,
}

impl RedrawTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of redraw requests seen.
    pub fn invalidations(&self) -> u64 {
        self.invalidations
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether a redraw was pending and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Workspace for RedrawTracker {
    fn invalidate(&mut self) {
        self.invalidations += 1;
        self.dirty = true;
        debug!("Workspace invalidated ({} total)", self.invalidations);
    }
}

#[derive(Debug)]
pub struct Document {
    id: Uuid,
    width: u32,
    height: u32,
    layers: Vec<UserLayer>,
    current_layer: usize,
    pub redraw: RedrawTracker,
}

impl Document {
    /// A new document with a single empty user layer.
    pub fn new(width: u32, height: u32) -> Self {
        info!("Creating document of size {}x{}", width, height);
        let mut doc = Self {
            id: Uuid::new_v4(),
            width,
            height,
            layers: Vec::new(),
            current_layer: 0,
            redraw: RedrawTracker::new(),
        };
        doc.add_user_layer("Background");
        doc
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layers(&self) -> &[UserLayer] {
        &self.layers
    }

    /// Append a layer sized to the document and make it current.
    pub fn add_user_layer(&mut self, name: impl Into<String>) -> Uuid {
        let layer = UserLayer::new(name, self.width, self.height);
        let id = layer.id();
        self.layers.push(layer);
        self.current_layer = self.layers.len() - 1;
        id
    }

    pub fn set_current_layer(&mut self, index: usize) -> bool {
        if index >= self.layers.len() {
            return false;
        }
        self.current_layer = index;
        true
    }

    pub fn current_user_layer(&self) -> &UserLayer {
        &self.layers[self.current_layer]
    }

    pub fn current_user_layer_mut(&mut self) -> &mut UserLayer {
        &mut self.layers[self.current_layer]
    }

    pub fn user_layer(&self, id: Uuid) -> Option<&UserLayer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    pub fn user_layer_mut(&mut self, id: Uuid) -> Option<&mut UserLayer> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    /// Borrow a layer together with the redraw tracker.
    pub fn layer_and_workspace_mut(
        &mut self,
        id: Uuid,
    ) -> Option<(&mut UserLayer, &mut RedrawTracker)> {
        let layer = self.layers.iter_mut().find(|l| l.id() == id)?;
        Some((layer, &mut self.redraw))
    }
}
