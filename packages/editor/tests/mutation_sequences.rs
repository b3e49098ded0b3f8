//! Tests for longer edit sequences against the undo history
//!
//! This tests:
//! - Undo reverts exactly one edit at a time
//! - No redo after undo
//! - Sort order stays contiguous through add/remove/reorder chains

use pagecraft_editor::{
    Document, History, PageSelection, PageType, Section, SectionMutation, SectionType,
};
use serde_json::json;

fn hero(id: &str) -> Section {
    Section::new(id, SectionType::Hero, id)
}

fn new_doc() -> Document {
    let mut doc = Document::new(PageSelection::new(1, PageType::Home));
    doc.load_sections(vec![hero("a"), hero("b"), hero("c")]);
    doc
}

fn edit(history: &mut History, doc: &mut Document, mutation: SectionMutation) {
    history.save(doc);
    mutation.apply(doc);
}

fn assert_contiguous(doc: &Document) {
    let orders: Vec<i64> = doc.sections().iter().map(|s| s.sort_order).collect();
    let expected: Vec<i64> = (0..doc.len() as i64).collect();
    assert_eq!(orders, expected);
}

fn sequence() -> Vec<SectionMutation> {
    vec![
        SectionMutation::AddSection { section: hero("d") },
        SectionMutation::UpdateSettings {
            id: "a".to_string(),
            patch: json!({ "title": "Summer sale" }).as_object().unwrap().clone(),
        },
        SectionMutation::Reorder {
            order: vec!["d".to_string(), "c".to_string()],
        },
        SectionMutation::ToggleVisibility { id: "b".to_string() },
        SectionMutation::RemoveSection { id: "c".to_string() },
        SectionMutation::DuplicateSection {
            id: "a".to_string(),
            new_id: "a-2".to_string(),
        },
    ]
}

#[test]
fn test_each_undo_reverts_exactly_one_edit() {
    let mut doc = new_doc();
    let mut history = History::new();
    let mut states = vec![doc.sections().to_vec()];

    for mutation in sequence() {
        edit(&mut history, &mut doc, mutation);
        states.push(doc.sections().to_vec());
    }

    // Walk back through every recorded state
    states.pop();
    while let Some(expected) = states.pop() {
        assert!(history.undo(&mut doc));
        assert_eq!(doc.sections(), expected.as_slice());
    }
    assert!(!history.can_undo());
}

#[test]
fn test_no_redo_after_undo() {
    let mut doc = new_doc();
    let mut history = History::new();

    edit(&mut history, &mut doc, SectionMutation::RemoveSection { id: "a".to_string() });
    let after_remove = doc.sections().to_vec();

    history.undo(&mut doc);
    assert_ne!(doc.sections(), after_remove.as_slice());
    assert!(!history.can_undo());

    // Nothing brings the removed state back except doing the edit again
    assert!(!history.undo(&mut doc));
    assert_ne!(doc.sections(), after_remove.as_slice());

    edit(&mut history, &mut doc, SectionMutation::RemoveSection { id: "a".to_string() });
    assert_eq!(doc.sections(), after_remove.as_slice());
}

#[test]
fn test_undo_on_empty_history_does_nothing() {
    let mut doc = new_doc();
    let mut history = History::new();
    let before = doc.sections().to_vec();

    assert!(!history.can_undo());
    assert!(!history.undo(&mut doc));
    assert_eq!(doc.sections(), before.as_slice());
    assert!(!doc.is_dirty());
}

#[test]
fn test_can_undo_tracks_stack() {
    let mut doc = new_doc();
    let mut history = History::new();

    for (i, mutation) in sequence().into_iter().enumerate() {
        edit(&mut history, &mut doc, mutation);
        assert_eq!(history.depth(), i + 1);
        assert!(history.can_undo());
    }
    while history.can_undo() {
        history.undo(&mut doc);
    }
    assert_eq!(history.depth(), 0);
}

#[test]
fn test_sort_order_contiguous_after_every_step() {
    let mut doc = new_doc();
    let mut history = History::new();

    for mutation in sequence() {
        edit(&mut history, &mut doc, mutation);
        assert_contiguous(&doc);
    }
    while history.undo(&mut doc) {
        assert_contiguous(&doc);
    }
}

#[test]
fn test_snapshot_unaffected_by_later_edits() {
    let mut doc = new_doc();
    let mut history = History::new();

    edit(
        &mut history,
        &mut doc,
        SectionMutation::UpdateSettings {
            id: "a".to_string(),
            patch: json!({ "images": ["one.png"] }).as_object().unwrap().clone(),
        },
    );
    let first = doc.sections().to_vec();

    edit(
        &mut history,
        &mut doc,
        SectionMutation::UpdateSettings {
            id: "a".to_string(),
            patch: json!({ "images": ["one.png", "two.png"] }).as_object().unwrap().clone(),
        },
    );

    history.undo(&mut doc);
    assert_eq!(doc.sections(), first.as_slice());
    assert_eq!(doc.section("a").unwrap().settings["images"], json!(["one.png"]));
}
