//! # Undo History
//!
//! Snapshot stack for single-step undo.
//!
//! ## Design
//!
//! - `save` deep-copies the section list and page selection *before* a
//!   mutation is applied, so the top entry is always the state preceding
//!   the latest edit
//! - `undo` pops the top entry and restores it into the document
//! - There is no redo stack: the state discarded by `undo` is gone
//! - Depth is bounded, oldest entries are dropped first
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//!
//! history.save(&doc);
//! doc.remove_section("hero");
//!
//! if history.can_undo() {
//!     history.undo(&mut doc);
//! }
//! ```

use crate::document::Document;
use pagecraft_common::{PageSelection, Section};

/// Default number of snapshots kept
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Full copy of the document taken before an edit
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub sections: Vec<Section>,
    pub selection: PageSelection,
}

impl HistoryEntry {
    pub(crate) fn capture(doc: &Document) -> Self {
        Self {
            sections: doc.sections().to_vec(),
            selection: doc.selection().clone(),
        }
    }
}

/// Undo-only snapshot stack
#[derive(Debug)]
pub struct History {
    /// Snapshots, most recent last
    entries: Vec<HistoryEntry>,

    /// Maximum number of snapshots (0 = unlimited)
    max_depth: usize,
}

impl History {
    /// Create a history with the default depth
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_depth,
        }
    }

    /// Snapshot the document ahead of a mutation
    pub fn save(&mut self, doc: &Document) {
        self.push(HistoryEntry::capture(doc));
    }

    /// Push an entry captured earlier, evicting the oldest past the cap
    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);

        if self.max_depth > 0 && self.entries.len() > self.max_depth {
            self.entries.remove(0);
        }
    }

    /// Restore the most recent snapshot
    ///
    /// Returns `false` and leaves the document untouched when empty.
    pub fn undo(&mut self, doc: &mut Document) -> bool {
        match self.entries.pop() {
            Some(entry) => {
                doc.restore(entry.selection, entry.sections);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Most recent snapshot, if any
    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
