//! # Pagecraft Editor
//!
//! State manager behind the visual page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ user edit (SectionMutation)                 │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: snapshot → mutate → mark dirty     │
//! │  - History: undo-only snapshot stack        │
//! │  - Document: sections of the open page      │
//! │  - StructuralComponents: header/footer      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ save: publish structural ∥ persist sections │
//! │  (independent branches, no rollback)        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Collaborators, EditorSession, SectionMutation, SessionOptions};
//!
//! let mut session = EditorSession::new(collaborators, SessionOptions::default(), selection);
//! session.initialize().await;
//!
//! session.edit(&SectionMutation::ToggleVisibility { id: "hero".into() });
//! if session.can_undo() {
//!     session.undo().await;
//! }
//!
//! if session.can_save() {
//!     let report = session.save().await;
//!     for notification in report.notifications() {
//!         println!("{}", notification.message);
//!     }
//! }
//! ```

mod document;
mod errors;
mod history;
mod mutations;
mod session;
mod structural;

pub use document::{Document, DocumentState};
pub use errors::EditorError;
pub use history::{History, HistoryEntry, DEFAULT_MAX_DEPTH};
pub use mutations::{parse_script, ControlStep, EditStep, SectionMutation};
pub use session::{
    fallback_sections, BranchOutcome, Collaborators, EditorSession, Notification,
    NotificationLevel, SaveReport, SessionOptions,
};
pub use structural::StructuralComponents;

// Re-export model types for convenience
pub use pagecraft_common::{
    PageId, PageSelection, PageType, Section, SectionType, Settings, StructuralSlot,
};
