//! In-memory backend with call counters and failure switches

#![allow(dead_code)]

use async_trait::async_trait;
use pagecraft_common::{
    BackendError, BackendResult, PageDirectory, PageId, PageRecord, PageType, Section,
    SectionStore, StructuralConfig, StructuralStore,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

pub struct FakeBackend {
    pub pages: Mutex<HashMap<PageId, Vec<Section>>>,
    pub structural: Mutex<StructuralConfig>,
    pub custom_pages: Mutex<HashMap<(String, PageType), u64>>,
    pub saved_to: Mutex<Vec<PageId>>,
    pub next_page_id: AtomicU64,

    pub load_calls: AtomicU64,
    pub save_calls: AtomicU64,
    pub ensure_calls: AtomicU64,
    pub fetch_calls: AtomicU64,
    pub publish_calls: AtomicU64,

    pub fail_load: AtomicBool,
    pub fail_save: AtomicBool,
    pub fail_ensure: AtomicBool,
    pub fail_fetch: AtomicBool,
    pub fail_publish: AtomicBool,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
            structural: Mutex::new(StructuralConfig::default()),
            custom_pages: Mutex::new(HashMap::new()),
            saved_to: Mutex::new(Vec::new()),
            next_page_id: AtomicU64::new(42),
            load_calls: AtomicU64::new(0),
            save_calls: AtomicU64::new(0),
            ensure_calls: AtomicU64::new(0),
            fetch_calls: AtomicU64::new(0),
            publish_calls: AtomicU64::new(0),
            fail_load: AtomicBool::new(false),
            fail_save: AtomicBool::new(false),
            fail_ensure: AtomicBool::new(false),
            fail_fetch: AtomicBool::new(false),
            fail_publish: AtomicBool::new(false),
        }
    }
}

impl FakeBackend {
    pub fn with_page(self, page_id: impl Into<PageId>, sections: Vec<Section>) -> Self {
        self.pages.lock().unwrap().insert(page_id.into(), sections);
        self
    }

    pub fn stored(&self, page_id: impl Into<PageId>) -> Option<Vec<Section>> {
        self.pages.lock().unwrap().get(&page_id.into()).cloned()
    }

    pub fn network_calls(&self) -> u64 {
        [
            &self.load_calls,
            &self.save_calls,
            &self.ensure_calls,
            &self.fetch_calls,
            &self.publish_calls,
        ]
        .iter()
        .map(|c| c.load(Ordering::SeqCst))
        .sum()
    }

    pub fn set(flag: &AtomicBool, value: bool) {
        flag.store(value, Ordering::SeqCst);
    }

    fn failing(flag: &AtomicBool, what: &str) -> BackendResult<()> {
        if flag.load(Ordering::SeqCst) {
            Err(BackendError::Unavailable(what.to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SectionStore for FakeBackend {
    async fn load_sections(&self, page_id: &PageId) -> BackendResult<Vec<Section>> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        Self::failing(&self.fail_load, "load")?;
        self.pages
            .lock()
            .unwrap()
            .get(page_id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(page_id.to_string()))
    }

    async fn save_sections(&self, page_id: &PageId, sections: &[Section]) -> BackendResult<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        Self::failing(&self.fail_save, "save")?;
        self.saved_to.lock().unwrap().push(page_id.clone());
        self.pages
            .lock()
            .unwrap()
            .insert(page_id.clone(), sections.to_vec());
        Ok(())
    }
}

#[async_trait]
impl PageDirectory for FakeBackend {
    async fn ensure_page_exists(
        &self,
        company_id: &str,
        page_type: PageType,
    ) -> BackendResult<PageRecord> {
        self.ensure_calls.fetch_add(1, Ordering::SeqCst);
        Self::failing(&self.fail_ensure, "ensure")?;
        let mut custom = self.custom_pages.lock().unwrap();
        let id = *custom
            .entry((company_id.to_string(), page_type))
            .or_insert_with(|| self.next_page_id.fetch_add(1, Ordering::SeqCst));
        Ok(PageRecord { id })
    }
}

#[async_trait]
impl StructuralStore for FakeBackend {
    async fn fetch_structural(&self) -> BackendResult<StructuralConfig> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Self::failing(&self.fail_fetch, "fetch")?;
        Ok(self.structural.lock().unwrap().clone())
    }

    async fn publish_structural(&self, config: &StructuralConfig) -> BackendResult<u64> {
        self.publish_calls.fetch_add(1, Ordering::SeqCst);
        Self::failing(&self.fail_publish, "publish")?;
        let mut stored = self.structural.lock().unwrap();
        let version = stored.version + 1;
        *stored = config.clone();
        stored.version = version;
        Ok(version)
    }
}
