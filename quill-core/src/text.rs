//! Editable text model for text layers.
//!
//! The engine stores lines of text, a caret, an optional selection anchor and
//! the formatting applied to the whole run. History entries only rely on
//! `Clone` producing an independent copy.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::TextEngineError;

/// Caret position as (line, character offset). Offsets count `char`s, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextPosition {
    pub line: usize,
    pub offset: usize,
}

impl TextPosition {
    pub fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFormat {
    pub font_family: String,
    pub font_size: u32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub alignment: Alignment,
    /// RGBA
    pub color: [u8; 4],
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            font_family: "Sans".into(),
            font_size: 12,
            bold: false,
            italic: false,
            underline: false,
            alignment: Alignment::Left,
            color: [0, 0, 0, 255],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTextEngine")]
pub struct TextEngine {
    lines: Vec<String>,
    position: TextPosition,
    selection_anchor: Option<TextPosition>,
    /// Top-left of the text block in canvas pixels.
    pub origin: (i32, i32),
    pub format: TextFormat,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            position: TextPosition::default(),
            selection_anchor: None,
            origin: (0, 0),
            format: TextFormat::default(),
        }
    }
}

// Unchecked wire form; `lines` must be non-empty and the caret in range
// before it becomes an engine.
#[derive(Deserialize)]
struct RawTextEngine {
    lines: Vec<String>,
    #[serde(default)]
    position: TextPosition,
    #[serde(default)]
    selection_anchor: Option<TextPosition>,
    #[serde(default)]
    origin: (i32, i32),
    #[serde(default)]
    format: TextFormat,
}

impl TryFrom<RawTextEngine> for TextEngine {
    type Error = TextEngineError;

    fn try_from(raw: RawTextEngine) -> Result<Self, Self::Error> {
        if raw.lines.is_empty() {
            return Err(TextEngineError::NoLines);
        }
        if let Some(line) = raw.lines.iter().position(|l| l.contains('\n')) {
            return Err(TextEngineError::NewlineInLine { line });
        }

        let mut engine = TextEngine {
            lines: raw.lines,
            position: TextPosition::default(),
            selection_anchor: None,
            origin: raw.origin,
            format: raw.format,
        };
        engine.position = engine.clamp(raw.position);
        engine.selection_anchor = raw.selection_anchor.map(|a| engine.clamp(a));
        Ok(engine)
    }
}

fn char_count(s: &str) -> usize {
    s.chars().count()
}

// byte index of the `offset`-th char, or the string length past the end
fn byte_index(s: &str, offset: usize) -> usize {
    s.char_indices()
        .nth(offset)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl TextEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let mut engine = Self::new();
        engine.insert_text(text);
        engine
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whole text joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn position(&self) -> TextPosition {
        self.position
    }

    pub fn set_position(&mut self, position: TextPosition) {
        self.position = self.clamp(position);
        self.selection_anchor = None;
    }

    pub fn selection(&self) -> Option<(TextPosition, TextPosition)> {
        let anchor = self.selection_anchor?;
        if anchor == self.position {
            return None;
        }
        Some((anchor.min(self.position), anchor.max(self.position)))
    }

    fn clamp(&self, position: TextPosition) -> TextPosition {
        let line = position.line.min(self.lines.len() - 1);
        let offset = position.offset.min(char_count(&self.lines[line]));
        TextPosition::new(line, offset)
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.perform_enter();
            return;
        }

        self.delete_selection();
        let line = &mut self.lines[self.position.line];
        let at = byte_index(line, self.position.offset);
        line.insert(at, c);
        self.position.offset += 1;
    }

    pub fn insert_text(&mut self, text: &str) {
        trace!("Inserting {:?} at {:?}", text, self.position);
        for c in text.chars() {
            self.insert_char(c);
        }
    }

    /// Split the current line at the caret.
    pub fn perform_enter(&mut self) {
        self.delete_selection();
        let line = &mut self.lines[self.position.line];
        let at = byte_index(line, self.position.offset);
        let rest = line.split_off(at);
        self.lines.insert(self.position.line + 1, rest);
        self.position = TextPosition::new(self.position.line + 1, 0);
    }

    pub fn perform_backspace(&mut self) {
        if self.delete_selection() {
            return;
        }

        if self.position.offset > 0 {
            let line = &mut self.lines[self.position.line];
            let at = byte_index(line, self.position.offset - 1);
            line.remove(at);
            self.position.offset -= 1;
        } else if self.position.line > 0 {
            let current = self.lines.remove(self.position.line);
            let prev = &mut self.lines[self.position.line - 1];
            let offset = char_count(prev);
            prev.push_str(&current);
            self.position = TextPosition::new(self.position.line - 1, offset);
        }
    }

    pub fn perform_delete(&mut self) {
        if self.delete_selection() {
            return;
        }

        let len = char_count(&self.lines[self.position.line]);
        if self.position.offset < len {
            let line = &mut self.lines[self.position.line];
            let at = byte_index(line, self.position.offset);
            line.remove(at);
        } else if self.position.line + 1 < self.lines.len() {
            let next = self.lines.remove(self.position.line + 1);
            self.lines[self.position.line].push_str(&next);
        }
    }

    pub fn perform_left(&mut self) {
        self.selection_anchor = None;
        if self.position.offset > 0 {
            self.position.offset -= 1;
        } else if self.position.line > 0 {
            let line = self.position.line - 1;
            self.position = TextPosition::new(line, char_count(&self.lines[line]));
        }
    }

    pub fn perform_right(&mut self) {
        self.selection_anchor = None;
        let len = char_count(&self.lines[self.position.line]);
        if self.position.offset < len {
            self.position.offset += 1;
        } else if self.position.line + 1 < self.lines.len() {
            self.position = TextPosition::new(self.position.line + 1, 0);
        }
    }

    pub fn perform_home(&mut self) {
        self.selection_anchor = None;
        self.position.offset = 0;
    }

    pub fn perform_end(&mut self) {
        self.selection_anchor = None;
        self.position.offset = char_count(&self.lines[self.position.line]);
    }

    pub fn select_all(&mut self) {
        self.selection_anchor = Some(TextPosition::default());
        let last = self.lines.len() - 1;
        self.position = TextPosition::new(last, char_count(&self.lines[last]));
    }

    /// Remove the selected range. Returns false if nothing was selected.
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection() else {
            self.selection_anchor = None;
            return false;
        };

        let tail = {
            let last = &self.lines[end.line];
            last[byte_index(last, end.offset)..].to_string()
        };
        let first = &mut self.lines[start.line];
        first.truncate(byte_index(first, start.offset));
        first.push_str(&tail);
        self.lines.drain(start.line + 1..=end.line);

        self.position = start;
        self.selection_anchor = None;
        true
    }

    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.position = TextPosition::default();
        self.selection_anchor = None;
    }
}
