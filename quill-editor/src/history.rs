// Undo/redo history stack for a document.

use quill_core::{Document, HistoryItem};
use tracing::{debug, info, trace, warn};

use crate::config::HistoryConfig;

pub struct History {
    items: Vec<Box<dyn HistoryItem>>,
    /// Number of items currently applied; `items[current_index..]` can be redone.
    current_index: usize,
    max_states: usize,
}

impl History {
    pub fn new(config: &HistoryConfig) -> Self {
        let max_states = if config.max_states == 0 {
            warn!("History configured with max_states = 0, keeping at least one state");
            1
        } else {
            config.max_states
        };

        Self {
            items: Vec::new(),
            current_index: 0,
            max_states,
        }
    }

    /// Record an already applied change. Discards anything that could be redone.
    pub fn push(&mut self, item: Box<dyn HistoryItem>) {
        info!("Pushing history item {:?}", item.label());

        for mut stale in self.items.drain(self.current_index..) {
            trace!("Discarding redo item {:?}", stale.label());
            stale.dispose();
        }

        self.items.push(item);
        self.current_index = self.items.len();

        while self.items.len() > self.max_states {
            let mut oldest = self.items.remove(0);
            debug!("History full, evicting {:?}", oldest.label());
            oldest.dispose();
            self.current_index -= 1;
        }
    }

    pub fn undo(&mut self, doc: &mut Document) -> bool {
        if !self.can_undo() {
            debug!("Nothing to undo");
            return false;
        }

        self.current_index -= 1;
        let item = &mut self.items[self.current_index];
        info!("Undo {:?}", item.label());
        item.undo(doc);
        true
    }

    pub fn redo(&mut self, doc: &mut Document) -> bool {
        if !self.can_redo() {
            debug!("Nothing to redo");
            return false;
        }

        let item = &mut self.items[self.current_index];
        info!("Redo {:?}", item.label());
        item.redo(doc);
        self.current_index += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index < self.items.len()
    }

    pub fn clear(&mut self) {
        info!("Clearing {} history items", self.items.len());
        for mut item in self.items.drain(..) {
            item.dispose();
        }
        self.current_index = 0;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn max_states(&self) -> usize {
        self.max_states
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.label()).collect()
    }

    pub fn memory_size(&self) -> usize {
        self.items.iter().map(|i| i.memory_size()).sum()
    }
}

impl Default for History {
    fn default() -> Self {
        History::new(&HistoryConfig::default())
    }
}

impl Drop for History {
    fn drop(&mut self) {
        for item in self.items.iter_mut() {
            item.dispose();
        }
    }
}
