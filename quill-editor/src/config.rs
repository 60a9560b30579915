//! Editor configuration.
//!
//! Every field has a default so partial JSON files load fine.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_max_states")]
    pub max_states: usize,
}

fn default_max_states() -> usize {
    50
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_states: default_max_states(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub history: HistoryConfig,

    /// `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default = "default_canvas_size")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_size")]
    pub canvas_height: u32,
}

fn default_log_filter() -> String {
    "info".into()
}

fn default_canvas_size() -> u32 {
    512
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            log_filter: default_log_filter(),
            canvas_width: default_canvas_size(),
            canvas_height: default_canvas_size(),
        }
    }
}

/// Save a config to disk as pretty JSON.
pub fn save_config(path: impl AsRef<Path>, config: &EditorConfig) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(config).context("serialize config to json")?;
    fs::write(path, json).with_context(|| format!("write config file: {}", path.display()))?;
    Ok(())
}

/// Load a config from disk.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<EditorConfig> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    let config: EditorConfig = serde_json::from_str(&data).context("parse config json")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{ "canvas_width": 64 }"#).unwrap();
        assert_eq!(config.canvas_width, 64);
        assert_eq!(config.canvas_height, 512);
        assert_eq!(config.history.max_states, 50);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn empty_history_section_uses_default_depth() {
        let config: EditorConfig = serde_json::from_str(r#"{ "history": {} }"#).unwrap();
        assert_eq!(config.history, HistoryConfig::default());
    }
}
