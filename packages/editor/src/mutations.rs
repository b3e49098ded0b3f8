//! # Section Mutations
//!
//! Serializable edit operations on a page document.
//!
//! Each variant maps onto one `Document` method. Mutations are
//! last-call-wins: a mutation that targets a section that no longer
//! exists does nothing and reports `false` instead of failing.
//!
//! Edit scripts are JSON arrays of mutations, with `{"op": "undo"}`
//! steps allowed in between.

use crate::document::Document;
use crate::errors::EditorError;
use pagecraft_common::{Section, Settings};
use serde::{Deserialize, Serialize};

/// User edit on the section list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum SectionMutation {
    /// Append a new section
    AddSection { section: Section },

    RemoveSection { id: String },

    /// Shallow-merge settings keys
    UpdateSettings { id: String, patch: Settings },

    /// Reorder by id list
    Reorder { order: Vec<String> },

    ToggleVisibility { id: String },

    #[serde(rename_all = "camelCase")]
    DuplicateSection { id: String, new_id: String },

    #[serde(rename_all = "camelCase")]
    MoveSection { id: String, to_index: usize },
}

impl SectionMutation {
    /// Apply to the document. Returns whether anything changed.
    pub fn apply(&self, doc: &mut Document) -> bool {
        match self {
            SectionMutation::AddSection { section } => doc.add_section(section.clone()),
            SectionMutation::RemoveSection { id } => doc.remove_section(id),
            SectionMutation::UpdateSettings { id, patch } => doc.update_section_settings(id, patch),
            SectionMutation::Reorder { order } => doc.reorder_sections(order),
            SectionMutation::ToggleVisibility { id } => doc.toggle_visibility(id),
            SectionMutation::DuplicateSection { id, new_id } => doc.duplicate_section(id, new_id),
            SectionMutation::MoveSection { id, to_index } => doc.move_section(id, *to_index),
        }
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            SectionMutation::AddSection { .. } => "addSection",
            SectionMutation::RemoveSection { .. } => "removeSection",
            SectionMutation::UpdateSettings { .. } => "updateSettings",
            SectionMutation::Reorder { .. } => "reorder",
            SectionMutation::ToggleVisibility { .. } => "toggleVisibility",
            SectionMutation::DuplicateSection { .. } => "duplicateSection",
            SectionMutation::MoveSection { .. } => "moveSection",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ControlStep {
    Undo,
}

/// One step of an edit script
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EditStep {
    Mutation(SectionMutation),
    Control(ControlStep),
}

/// Parse a JSON edit script
pub fn parse_script(source: &str) -> Result<Vec<EditStep>, EditorError> {
    Ok(serde_json::from_str(source)?)
}
