//! # Editor Session
//!
//! The explicit store behind the page builder. One session owns the
//! open page document, its undo history and the structural components,
//! and talks to the backend only through injected collaborators.
//!
//! Mutations are synchronous. Only page loads, page materialization,
//! publish and save await, and every mutating method takes `&mut self`,
//! so a snapshot can never observe a half-applied edit.
//!
//! ## Saving
//!
//! `save` runs two independent branches:
//! 1. structural components, when they have pending changes
//! 2. page sections, when the document is dirty
//!
//! A failure in one branch never stops the other and nothing is rolled
//! back. The flag of a failed branch stays set so the next save retries
//! just that half.

use crate::document::Document;
use crate::history::{History, HistoryEntry, DEFAULT_MAX_DEPTH};
use crate::mutations::{ControlStep, EditStep, SectionMutation};
use crate::structural::StructuralComponents;
use pagecraft_common::{
    PageDirectory, PageId, PageSelection, PageType, Section, SectionStore, StructuralStore,
};
use std::sync::Arc;

/// Backend dependencies of a session
#[derive(Clone)]
pub struct Collaborators {
    pub sections: Arc<dyn SectionStore>,
    pub pages: Arc<dyn PageDirectory>,
    pub structural: Arc<dyn StructuralStore>,
}

impl Collaborators {
    /// Use one backend object for every collaborator
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: SectionStore + PageDirectory + StructuralStore + 'static,
    {
        Self {
            sections: backend.clone(),
            pages: backend.clone(),
            structural: backend,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Owner of lazily created pages
    pub company_id: String,

    /// Undo depth (0 = unlimited)
    pub history_depth: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            company_id: "default".to_string(),
            history_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Result of one save branch
#[derive(Debug, Clone, PartialEq)]
pub enum BranchOutcome {
    /// Nothing pending, no call made
    Skipped,
    Saved,
    Failed(String),
}

impl BranchOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, BranchOutcome::Saved)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, BranchOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Transient message shown to the user after a save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// What a save attempted and how each branch ended
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    pub structural: BranchOutcome,
    pub sections: BranchOutcome,
}

impl SaveReport {
    pub fn nothing_to_save(&self) -> bool {
        self.structural == BranchOutcome::Skipped && self.sections == BranchOutcome::Skipped
    }

    /// At least one branch ran and succeeded
    pub fn succeeded(&self) -> bool {
        self.structural.is_saved() || self.sections.is_saved()
    }

    /// Any branch failed, even if the other one saved
    pub fn has_failures(&self) -> bool {
        self.structural.is_failed() || self.sections.is_failed()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        let mut notifications = Vec::new();

        if let BranchOutcome::Failed(e) = &self.structural {
            notifications.push(Notification {
                level: NotificationLevel::Error,
                message: format!("Failed to publish header and footer: {}", e),
            });
        }
        if let BranchOutcome::Failed(e) = &self.sections {
            notifications.push(Notification {
                level: NotificationLevel::Error,
                message: format!("Failed to save page sections: {}", e),
            });
        }
        if self.succeeded() {
            notifications.push(Notification {
                level: NotificationLevel::Success,
                message: "Changes saved".to_string(),
            });
        }

        notifications
    }
}

/// Single-user editing session for the page builder
pub struct EditorSession {
    document: Document,
    history: History,
    structural: StructuralComponents,
    section_store: Arc<dyn SectionStore>,
    page_directory: Arc<dyn PageDirectory>,
    company_id: String,
}

impl EditorSession {
    /// Create a session for `selection`. Nothing is loaded until `initialize`.
    pub fn new(collaborators: Collaborators, options: SessionOptions, selection: PageSelection) -> Self {
        Self {
            document: Document::new(selection),
            history: History::with_max_depth(options.history_depth),
            structural: StructuralComponents::new(collaborators.structural),
            section_store: collaborators.sections,
            page_directory: collaborators.pages,
            company_id: options.company_id,
        }
    }

    /// Load structural components and the initial page
    pub async fn initialize(&mut self) {
        if let Err(e) = self.structural.initialize().await {
            tracing::warn!(error = %e, "Failed to load structural components");
        }

        let selection = self.document.selection().clone();
        self.open_page(selection.page_id, selection.page_type).await;
    }

    /// Switch to another page
    ///
    /// Unsaved edits on the current page are dropped; callers must save
    /// first if they want to keep them. The new page is always fetched
    /// from the backend, and undo history starts over from it.
    pub async fn select_page(&mut self, page_id: PageId, page_type: PageType) -> &PageSelection {
        if self.document.is_dirty() {
            tracing::warn!(
                page_id = %self.document.selection().page_id,
                "Switching pages with unsaved section changes, discarding them"
            );
        }
        self.open_page(page_id, page_type).await;
        self.document.selection()
    }

    async fn open_page(&mut self, page_id: PageId, page_type: PageType) {
        let page_id = self.resolve_page_id(page_id, page_type).await;
        let selection = PageSelection { page_id, page_type };

        let sections = self.load_with_fallback(&selection).await;
        self.document.select(selection);
        self.document.load_sections(sections);

        // History never spans pages; the loaded state is the new baseline
        self.history.clear();
        self.history.save(&self.document);
    }

    /// Materialize lazily created pages, keeping the given id on failure
    async fn resolve_page_id(&self, page_id: PageId, page_type: PageType) -> PageId {
        if !page_type.is_lazily_created() {
            return page_id;
        }

        match self
            .page_directory
            .ensure_page_exists(&self.company_id, page_type)
            .await
        {
            Ok(record) => {
                tracing::debug!(page_type = %page_type, id = record.id, "Page materialized");
                PageId::Remote(record.id)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    page_id = %page_id,
                    "Failed to ensure page exists, keeping current identifier"
                );
                page_id
            }
        }
    }

    async fn load_with_fallback(&self, selection: &PageSelection) -> Vec<Section> {
        match self.section_store.load_sections(&selection.page_id).await {
            Ok(sections) => {
                tracing::info!(
                    page_id = %selection.page_id,
                    count = sections.len(),
                    "Loaded page sections"
                );
                sections
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    page_id = %selection.page_id,
                    "Failed to load sections, using defaults"
                );
                fallback_sections(selection.page_type)
            }
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct document access. Call `save_history` before mutating.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn selection(&self) -> &PageSelection {
        self.document.selection()
    }

    pub fn sections(&self) -> &[Section] {
        self.document.sections()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn structural(&self) -> &StructuralComponents {
        &self.structural
    }

    pub fn structural_mut(&mut self) -> &mut StructuralComponents {
        &mut self.structural
    }

    /// Snapshot the current document ahead of an edit
    pub fn save_history(&mut self) {
        self.history.save(&self.document);
    }

    /// Apply a mutation, recording the prior state when it changes something
    ///
    /// A mutation that changes nothing leaves the history untouched, even
    /// when the stack is at its depth limit.
    pub fn edit(&mut self, mutation: &SectionMutation) -> bool {
        let before = HistoryEntry::capture(&self.document);
        let changed = mutation.apply(&mut self.document);

        if changed {
            self.history.push(before);
            tracing::debug!(op = mutation.name(), "Applied section mutation");
        } else {
            tracing::debug!(op = mutation.name(), "Section mutation had no effect");
        }
        changed
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Revert the most recent edit
    ///
    /// Also refreshes the structural components, which clears their
    /// pending-changes flag even though they are a separate document.
    /// If the refresh fails the flag is cleared anyway.
    pub async fn undo(&mut self) -> bool {
        if !self.history.undo(&mut self.document) {
            return false;
        }
        tracing::debug!(remaining = self.history.depth(), "Undo");

        if let Err(e) = self.structural.refresh().await {
            tracing::warn!(error = %e, "Structural refresh after undo failed");
            self.structural.reset_changes_flag();
        }
        true
    }

    pub fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    pub fn has_structural_changes(&self) -> bool {
        self.structural.has_changes()
    }

    /// Whether the save control should be enabled
    pub fn can_save(&self) -> bool {
        self.has_structural_changes() || self.is_dirty()
    }

    /// Persist whatever is pending
    pub async fn save(&mut self) -> SaveReport {
        let structural = if self.structural.has_changes() {
            match self.structural.publish().await {
                Ok(_) => BranchOutcome::Saved,
                Err(e) => {
                    tracing::warn!(error = %e, "Structural publish failed");
                    BranchOutcome::Failed(e.to_string())
                }
            }
        } else {
            BranchOutcome::Skipped
        };

        let sections = if self.document.is_dirty() {
            let page_id = self.document.selection().page_id.clone();
            match self
                .section_store
                .save_sections(&page_id, self.document.sections())
                .await
            {
                Ok(()) => {
                    tracing::info!(page_id = %page_id, "Saved page sections");
                    self.document.mark_saved();
                    BranchOutcome::Saved
                }
                Err(e) => {
                    tracing::warn!(error = %e, page_id = %page_id, "Section save failed");
                    BranchOutcome::Failed(e.to_string())
                }
            }
        } else {
            BranchOutcome::Skipped
        };

        SaveReport {
            structural,
            sections,
        }
    }

    /// Reload the current page from the backend, dropping local edits
    pub async fn discard_changes(&mut self) {
        let selection = self.document.selection().clone();
        let sections = self.load_with_fallback(&selection).await;
        self.document.load_sections(sections);
    }

    /// Run an edit script, returning how many steps changed the document
    pub async fn run_script(&mut self, steps: &[EditStep]) -> usize {
        let mut applied = 0;
        for step in steps {
            let changed = match step {
                EditStep::Mutation(mutation) => self.edit(mutation),
                EditStep::Control(ControlStep::Undo) => self.undo().await,
            };
            if changed {
                applied += 1;
            }
        }
        applied
    }
}

/// Sections used when a page could not be loaded
pub fn fallback_sections(page_type: PageType) -> Vec<Section> {
    match page_type {
        PageType::Product => vec![Section::default_product_information()],
        _ => Vec::new(),
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("document", &self.document)
            .field("history", &self.history)
            .field("structural", &self.structural)
            .field("company_id", &self.company_id)
            .finish()
    }
}
