//! # Page Document
//!
//! The in-memory section list of the page currently open in the editor.
//!
//! Only one page is held at a time. Switching pages replaces the list,
//! there is no per-page cache.
//!
//! ## Lifecycle
//!
//! ```text
//! Select → Load → Edit → Save
//!   ↓       ↓      ↓      ↓
//! Page   Sections Dirty  Clean
//! ```
//!
//! Every effective structural change renumbers `sort_order` to match
//! array position. Operations on unknown ids are no-ops that return
//! `false` and leave the dirty flag alone.

use pagecraft_common::{PageSelection, Section, Settings};

/// Whether the document differs from what was last loaded or saved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    Clean,
    Dirty,
}

/// Editable section list for one page
#[derive(Debug, Clone)]
pub struct Document {
    selection: PageSelection,
    sections: Vec<Section>,
    dirty: bool,
}

impl Document {
    /// Create an empty, clean document for a page
    pub fn new(selection: PageSelection) -> Self {
        Self {
            selection,
            sections: Vec::new(),
            dirty: false,
        }
    }

    pub fn selection(&self) -> &PageSelection {
        &self.selection
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn state(&self) -> DocumentState {
        if self.dirty {
            DocumentState::Dirty
        } else {
            DocumentState::Clean
        }
    }

    /// Sections that the renderer should draw
    pub fn visible_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.visible)
    }

    /// Switch the active page context. Sections are left to the caller to load.
    pub fn select(&mut self, selection: PageSelection) {
        self.selection = selection;
    }

    /// Replace the whole list with freshly fetched sections
    ///
    /// Not a user edit: the document becomes clean.
    pub fn load_sections(&mut self, mut sections: Vec<Section>) {
        sections.sort_by_key(|s| s.sort_order);
        let mut seen = std::collections::HashSet::new();
        sections.retain(|s| {
            let first = seen.insert(s.id.clone());
            if !first {
                tracing::warn!(section_id = %s.id, "Dropping duplicate section id from load");
            }
            first
        });
        self.sections = sections;
        renumber(&mut self.sections);
        self.dirty = false;
    }

    /// Append a section. Duplicate ids are ignored.
    pub fn add_section(&mut self, section: Section) -> bool {
        if self.section(&section.id).is_some() {
            tracing::debug!(section_id = %section.id, "add_section: id already present");
            return false;
        }
        self.sections.push(section);
        self.structure_changed();
        true
    }

    pub fn remove_section(&mut self, id: &str) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        self.sections.remove(pos);
        self.structure_changed();
        true
    }

    /// Shallow-merge `patch` into the section's settings
    pub fn update_section_settings(&mut self, id: &str, patch: &Settings) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.id == id) else {
            return false;
        };

        let mut changed = false;
        for (key, value) in patch {
            if section.settings.get(key) != Some(value) {
                section.settings.insert(key.clone(), value.clone());
                changed = true;
            }
        }

        if changed {
            self.dirty = true;
        }
        changed
    }

    /// Reorder by id list
    ///
    /// Listed ids come first in the given order, unknown ids are skipped,
    /// unlisted sections keep their relative order after the listed ones.
    pub fn reorder_sections(&mut self, new_order: &[String]) -> bool {
        let mut remaining = std::mem::take(&mut self.sections);
        let mut reordered = Vec::with_capacity(remaining.len());

        for id in new_order {
            if let Some(pos) = remaining.iter().position(|s| &s.id == id) {
                reordered.push(remaining.remove(pos));
            }
        }
        reordered.extend(remaining);

        let changed = reordered
            .iter()
            .enumerate()
            .any(|(index, s)| s.sort_order != index as i64);

        self.sections = reordered;
        if changed {
            self.structure_changed();
        }
        changed
    }

    pub fn toggle_visibility(&mut self, id: &str) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        section.visible = !section.visible;
        self.dirty = true;
        true
    }

    /// Insert a copy of a section right after it, under a new id
    pub fn duplicate_section(&mut self, id: &str, new_id: &str) -> bool {
        if self.section(new_id).is_some() {
            return false;
        }
        let Some(pos) = self.position(id) else {
            return false;
        };

        let mut copy = self.sections[pos].clone();
        copy.id = new_id.to_string();
        self.sections.insert(pos + 1, copy);
        self.structure_changed();
        true
    }

    /// Move a section to `to_index`, clamped to the end of the list
    pub fn move_section(&mut self, id: &str, to_index: usize) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        let to = to_index.min(self.sections.len() - 1);
        if from == to {
            return false;
        }

        let section = self.sections.remove(from);
        self.sections.insert(to, section);
        self.structure_changed();
        true
    }

    pub(crate) fn restore(&mut self, selection: PageSelection, sections: Vec<Section>) {
        self.selection = selection;
        self.sections = sections;
        self.dirty = true;
    }

    pub(crate) fn mark_saved(&mut self) {
        self.dirty = false;
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    fn structure_changed(&mut self) {
        renumber(&mut self.sections);
        self.dirty = true;
    }
}

fn renumber(sections: &mut [Section]) {
    for (index, section) in sections.iter_mut().enumerate() {
        section.sort_order = index as i64;
    }
}
