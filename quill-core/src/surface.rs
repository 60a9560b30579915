// Pixel surfaces backing layers and history snapshots.
// Cloning a surface always copies its pixels; nothing is shared between clones.

use egui::Color32;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ImageSurface {
    width: u32,
    height: u32,
    pixels: Vec<Color32>,
    disposed: bool,
}

impl ImageSurface {
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        debug!(
            "Creating surface of size {}x{} with background {:?}",
            width, height, background
        );

        let total_pixels = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![background; total_pixels],
            disposed: false,
        }
    }

    /// A fully transparent surface.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::new(width, height, Color32::TRANSPARENT)
    }

    fn is_valid_coordinate(&self, x: u32, y: u32) -> bool {
        !self.disposed && x < self.width && y < self.height
    }

    // convert 2d coordinates to 1d index
    fn coord_to_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color32> {
        if !self.is_valid_coordinate(x, y) {
            warn!("Requested pixel at invalid coordinates ({}, {})", x, y);
            return None;
        }

        Some(self.pixels[self.coord_to_index(x, y)])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color32) -> bool {
        if !self.is_valid_coordinate(x, y) {
            warn!("Attempted to set pixel at invalid coordinates ({}, {})", x, y);
            return false;
        }

        let index = self.coord_to_index(x, y);
        trace!("Setting pixel ({}, {}) to {:?}", x, y, color);
        self.pixels[index] = color;
        true
    }

    pub fn fill(&mut self, color: Color32) {
        trace!("Filling surface with {:?}", color);
        for pixel in self.pixels.iter_mut() {
            *pixel = color;
        }
    }

    pub fn clear(&mut self) {
        self.fill(Color32::TRANSPARENT);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.pixels
    }

    pub fn is_empty_geometry(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn same_geometry(&self, other: &ImageSurface) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Release the pixel storage. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        trace!("Releasing {}x{} surface", self.width, self.height);
        self.pixels = Vec::new();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Bytes held by the pixel storage (4 per RGBA pixel).
    pub fn memory_size(&self) -> usize {
        self.pixels.capacity() * 4
    }
}
