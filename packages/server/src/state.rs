use crate::error::ServerError;
use pagecraft_common::{PageType, Section, SectionType, StructuralConfig};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Stored page record
#[derive(Clone, Debug)]
pub struct PageState {
    pub page_type: PageType,
    pub sections: Vec<Section>,
    pub version: u64,
}

#[derive(Debug, Default)]
struct Store {
    pages: HashMap<u64, PageState>,
    lazy_pages: HashMap<(String, PageType), u64>,
    structural: StructuralConfig,
    next_id: u64,
}

/// In-memory backend shared by all handlers
#[derive(Clone, Debug)]
pub struct BackendState {
    store: Arc<RwLock<Store>>,
}

impl BackendState {
    /// Empty backend. Ids start at 1.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                next_id: 1,
                ..Default::default()
            })),
        }
    }

    /// Backend with one record per built-in page type (ids 1..=7)
    pub async fn seeded() -> Self {
        let state = Self::new();
        {
            let mut store = state.store.write().await;
            for page_type in PageType::BUILT_IN {
                let id = store.next_id;
                store.next_id += 1;
                store.pages.insert(
                    id,
                    PageState {
                        page_type,
                        sections: default_sections(page_type),
                        version: 0,
                    },
                );
            }
        }
        state
    }

    pub async fn page(&self, id: u64) -> Option<PageState> {
        self.store.read().await.pages.get(&id).cloned()
    }

    pub async fn sections(&self, id: u64) -> Result<Vec<Section>, ServerError> {
        self.page(id)
            .await
            .map(|page| page.sections)
            .ok_or_else(|| ServerError::PageNotFound(id.to_string()))
    }

    /// Replace a page's sections wholesale
    pub async fn replace_sections(&self, id: u64, sections: Vec<Section>) -> Result<u64, ServerError> {
        validate_sections(&sections)?;

        let mut store = self.store.write().await;
        let page = store
            .pages
            .get_mut(&id)
            .ok_or_else(|| ServerError::PageNotFound(id.to_string()))?;

        page.sections = sections;
        page.version += 1;
        Ok(page.version)
    }

    /// Idempotent upsert of a lazily created page
    pub async fn ensure_page(&self, company_id: &str, page_type: PageType) -> (u64, bool) {
        let mut store = self.store.write().await;
        let key = (company_id.to_string(), page_type);

        if let Some(id) = store.lazy_pages.get(&key) {
            return (*id, false);
        }

        let id = store.next_id;
        store.next_id += 1;
        store.lazy_pages.insert(key, id);
        store.pages.insert(
            id,
            PageState {
                page_type,
                sections: Vec::new(),
                version: 0,
            },
        );
        (id, true)
    }

    pub async fn structural(&self) -> StructuralConfig {
        self.store.read().await.structural.clone()
    }

    /// Store a published config, last writer wins
    pub async fn publish_structural(&self, mut config: StructuralConfig) -> u64 {
        let mut store = self.store.write().await;
        config.version = store.structural.version + 1;
        config.published_at = Some(chrono::Utc::now());
        store.structural = config;
        store.structural.version
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_sections(sections: &[Section]) -> Result<(), ServerError> {
    let mut ids = HashSet::new();
    for section in sections {
        if section.id.trim().is_empty() {
            return Err(ServerError::InvalidSections("empty section id".to_string()));
        }
        if !ids.insert(section.id.as_str()) {
            return Err(ServerError::InvalidSections(format!(
                "duplicate section id {}",
                section.id
            )));
        }
    }
    Ok(())
}

fn default_sections(page_type: PageType) -> Vec<Section> {
    match page_type {
        PageType::Home => vec![Section::new("hero", SectionType::Hero, "Hero")],
        PageType::Product => vec![Section::default_product_information()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_pages() {
        let state = BackendState::seeded().await;
        assert_eq!(state.page(1).await.unwrap().page_type, PageType::Home);
        assert_eq!(state.sections(2).await.unwrap()[0].id, "product-information");
        assert!(state.page(8).await.is_none());
    }

    #[tokio::test]
    async fn test_ensure_page_is_idempotent() {
        let state = BackendState::seeded().await;

        let (first, created) = state.ensure_page("acme", PageType::Custom).await;
        assert!(created);
        assert_eq!(first, 8);

        let (second, created) = state.ensure_page("acme", PageType::Custom).await;
        assert!(!created);
        assert_eq!(first, second);

        let (other, _) = state.ensure_page("globex", PageType::Custom).await;
        assert_ne!(other, first);
    }

    #[tokio::test]
    async fn test_replace_rejects_duplicates() {
        let state = BackendState::seeded().await;
        let sections = vec![
            Section::new("a", SectionType::Hero, "A"),
            Section::new("a", SectionType::Gallery, "B"),
        ];
        assert!(matches!(
            state.replace_sections(1, sections).await,
            Err(ServerError::InvalidSections(_))
        ));
    }

    #[tokio::test]
    async fn test_publish_bumps_version() {
        let state = BackendState::new();
        assert_eq!(state.publish_structural(StructuralConfig::default()).await, 1);
        assert_eq!(state.publish_structural(StructuralConfig::default()).await, 2);

        let stored = state.structural().await;
        assert_eq!(stored.version, 2);
        assert!(stored.published_at.is_some());
    }
}
