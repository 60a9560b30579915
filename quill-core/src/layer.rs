// Layers of a document. A user layer carries its own text sub-layer plus the
// editable text model that produced it.

use egui::Color32;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::{ImageSurface, Rectangle, TextEngine};

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub surface: ImageSurface,
    pub hidden: bool,
    pub opacity: f32,
}

impl Layer {
    pub fn new(name: impl Into<String>, surface: ImageSurface) -> Self {
        Self {
            name: name.into(),
            surface,
            hidden: false,
            opacity: 1.0,
        }
    }
}

#[derive(Debug)]
pub struct UserLayer {
    id: Uuid,
    pub layer: Layer,
    /// Rendered text, kept apart from the pixels the user painted.
    pub text_layer: Layer,
    pub text_engine: TextEngine,
    pub text_bounds: Rectangle,
}

impl UserLayer {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        let name = name.into();
        debug!("Creating user layer {:?} ({}x{})", name, width, height);

        Self {
            id: Uuid::new_v4(),
            text_layer: Layer::new(
                format!("{name} text"),
                ImageSurface::transparent(width, height),
            ),
            layer: Layer::new(name, ImageSurface::transparent(width, height)),
            text_engine: TextEngine::new(),
            text_bounds: Rectangle::zero(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn surface(&self) -> &ImageSurface {
        &self.layer.surface
    }

    pub fn surface_mut(&mut self) -> &mut ImageSurface {
        &mut self.layer.surface
    }

    pub fn text_surface(&self) -> &ImageSurface {
        &self.text_layer.surface
    }

    pub fn text_surface_mut(&mut self) -> &mut ImageSurface {
        &mut self.text_layer.surface
    }

    /// Rasterize the text engine into the text sub-surface and refresh
    /// `text_bounds`. Each glyph is drawn as a solid cell.
    pub fn redraw_text(&mut self) {
        let size = self.text_engine.format.font_size.max(1) as i32;
        let advance = (size * 3 / 5).max(1);
        let line_height = size + size / 4;
        let (ox, oy) = self.text_engine.origin;
        let [r, g, b, a] = self.text_engine.format.color;
        let color = Color32::from_rgba_unmultiplied(r, g, b, a);

        let surface = &mut self.text_layer.surface;
        surface.clear();
        let (width, height) = (surface.width() as i32, surface.height() as i32);

        let mut widest = 0;
        for (row, line) in self.text_engine.lines().iter().enumerate() {
            let top = oy + row as i32 * line_height;
            for (col, c) in line.chars().enumerate() {
                if c.is_whitespace() {
                    continue;
                }
                let left = ox + col as i32 * advance;
                // clip the glyph cell to the surface
                for y in top.max(0)..(top + size).min(height) {
                    for x in left.max(0)..(left + advance - 1).min(width) {
                        surface.set_pixel(x as u32, y as u32, color);
                    }
                }
            }
            widest = widest.max(line.chars().count() as i32);
        }

        self.text_bounds = Rectangle::new(
            ox,
            oy,
            widest * advance,
            self.text_engine.line_count() as i32 * line_height,
        );
        trace!("Text redrawn, bounds {:?}", self.text_bounds);
    }
}
