//! # Backend Collaborators
//!
//! The editor never talks to the network directly. Persistence, page
//! materialization and structural components go through these traits so
//! the core runs against an HTTP client, the reference server or a fake.

use crate::model::{PageId, PageRecord, PageType, Section, StructuralConfig};
use crate::result::BackendResult;
use async_trait::async_trait;

/// Loads and persists the section list of a page
#[async_trait]
pub trait SectionStore: Send + Sync {
    /// Fetch the saved sections of a page
    async fn load_sections(&self, page_id: &PageId) -> BackendResult<Vec<Section>>;

    /// Replace the saved sections of a page wholesale
    async fn save_sections(&self, page_id: &PageId, sections: &[Section]) -> BackendResult<()>;
}

/// Materializes pages that only exist once first selected
#[async_trait]
pub trait PageDirectory: Send + Sync {
    /// Idempotent upsert: repeated calls return the same record
    async fn ensure_page_exists(
        &self,
        company_id: &str,
        page_type: PageType,
    ) -> BackendResult<PageRecord>;
}

/// Remote copy of the structural components document
#[async_trait]
pub trait StructuralStore: Send + Sync {
    async fn fetch_structural(&self) -> BackendResult<StructuralConfig>;

    /// Publish the config and return the version assigned by the backend
    async fn publish_structural(&self, config: &StructuralConfig) -> BackendResult<u64>;
}
