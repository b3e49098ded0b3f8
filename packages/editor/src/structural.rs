//! # Structural Components
//!
//! Header, footer and announcement bar are a separate document from the
//! page sections. They carry their own change flag, are published on
//! their own and can be refreshed from the backend, which throws away
//! unpublished local edits.
//!
//! The backend copy is last-writer-wins. No conflict detection.

use crate::errors::EditorError;
use pagecraft_common::{Settings, StructuralComponent, StructuralConfig, StructuralSlot, StructuralStore};
use std::sync::Arc;

/// Local working copy of the structural components document
pub struct StructuralComponents {
    store: Arc<dyn StructuralStore>,
    config: StructuralConfig,
    has_changes: bool,
}

impl StructuralComponents {
    pub fn new(store: Arc<dyn StructuralStore>) -> Self {
        Self {
            store,
            config: StructuralConfig::default(),
            has_changes: false,
        }
    }

    /// Fetch the published config once at session start
    pub async fn initialize(&mut self) -> Result<(), EditorError> {
        self.refresh().await
    }

    pub fn config(&self) -> &StructuralConfig {
        &self.config
    }

    pub fn component(&self, slot: StructuralSlot) -> Option<&StructuralComponent> {
        self.config.component(slot)
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    pub fn set_enabled(&mut self, slot: StructuralSlot, enabled: bool) -> bool {
        let component = self.config.components.entry(slot).or_default();
        if component.enabled == enabled {
            return false;
        }
        component.enabled = enabled;
        self.has_changes = true;
        true
    }

    /// Shallow-merge settings keys into a slot
    pub fn update_settings(&mut self, slot: StructuralSlot, patch: &Settings) -> bool {
        let component = self.config.components.entry(slot).or_default();

        let mut changed = false;
        for (key, value) in patch {
            if component.settings.get(key) != Some(value) {
                component.settings.insert(key.clone(), value.clone());
                changed = true;
            }
        }

        if changed {
            self.has_changes = true;
        }
        changed
    }

    pub fn replace(&mut self, slot: StructuralSlot, component: StructuralComponent) -> bool {
        if self.config.components.get(&slot) == Some(&component) {
            return false;
        }
        self.config.components.insert(slot, component);
        self.has_changes = true;
        true
    }

    /// Push the local config to the backend
    ///
    /// On success the local copy is refreshed and the change flag cleared.
    /// On failure the flag stays set so the next save retries.
    pub async fn publish(&mut self) -> Result<u64, EditorError> {
        let version = self.store.publish_structural(&self.config).await?;
        tracing::info!(version, "Published structural components");

        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Refresh after publish failed, keeping local copy");
            self.config.version = version;
            self.has_changes = false;
        }

        Ok(version)
    }

    /// Reload from the backend, discarding unpublished local edits
    pub async fn refresh(&mut self) -> Result<(), EditorError> {
        let config = self.store.fetch_structural().await?;
        tracing::debug!(version = config.version, "Refreshed structural components");
        self.config = config;
        self.has_changes = false;
        Ok(())
    }

    /// Clear the change flag without touching the backend
    pub fn reset_changes_flag(&mut self) {
        self.has_changes = false;
    }
}

impl std::fmt::Debug for StructuralComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructuralComponents")
            .field("config", &self.config)
            .field("has_changes", &self.has_changes)
            .finish()
    }
}
