//! quill-core: layers, surfaces and undo history entries for text editing.
//!
//! Design rules:
//! - Surfaces are plain owned pixel buffers; cloning is always a deep copy.
//! - History entries own their snapshots exclusively and exchange them with the
//!   live layer by moving values, never by sharing them.
//! - Rendered pixels and the text model of a layer are always swapped together.

pub mod document;
pub mod error;
pub mod geometry;
pub mod history;
pub mod layer;
pub mod surface;
pub mod text;

pub use document::{Document, RedrawTracker, Workspace};
pub use error::{HistoryError, TextEngineError};
pub use geometry::Rectangle;
pub use history::{HistoryItem, TextHistoryItem};
pub use layer::{Layer, UserLayer};
pub use surface::ImageSurface;
pub use text::{Alignment, TextEngine, TextFormat, TextPosition};
