//! Undoable units of change.

pub mod text;

pub use text::TextHistoryItem;

use crate::Document;

/// One entry of a document's undo history.
///
/// The owning history stack decides when to call `undo`/`redo` and must call
/// `dispose` when the entry is discarded.
pub trait HistoryItem {
    fn label(&self) -> &str;

    fn icon(&self) -> &str;

    fn undo(&mut self, doc: &mut Document);

    fn redo(&mut self, doc: &mut Document);

    /// Release held pixel storage. Must be idempotent and must not panic.
    fn dispose(&mut self);

    /// Approximate bytes held by the entry.
    fn memory_size(&self) -> usize {
        0
    }
}
