// Editor layer for QUILL: history stack, tools and configuration.

pub mod config;
pub mod history;
pub mod logging;
pub mod tools;

pub use config::{load_config, save_config, EditorConfig, HistoryConfig};
pub use history::History;
pub use tools::{Brush, TextTool, Tool, TEXT_ICON};
