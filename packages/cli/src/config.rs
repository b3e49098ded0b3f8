use anyhow::{anyhow, Context};
use pagecraft_common::{PageId, PageSelection, PageType};
use pagecraft_editor::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the backend API
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Company that owns lazily created pages
    #[serde(default = "default_company_id")]
    pub company_id: String,

    /// Undo depth (0 = unlimited)
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,

    /// Known backend ids of built-in pages
    #[serde(default)]
    pub pages: BTreeMap<PageType, u64>,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:3030".to_string()
}

fn default_company_id() -> String {
    "default".to_string()
}

fn default_history_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = Self::path(cwd);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn path(cwd: &Path) -> PathBuf {
        cwd.join(DEFAULT_CONFIG_NAME)
    }

    /// Resolve which page to open
    ///
    /// An explicit id wins, then the configured id for the page type.
    /// Custom pages fall back to a placeholder that the backend replaces.
    pub fn selection(&self, page_type: PageType, page_id: Option<&str>) -> anyhow::Result<PageSelection> {
        if let Some(raw) = page_id {
            let id: PageId = raw.parse().unwrap_or_else(|never| match never {});
            return Ok(PageSelection::new(id, page_type));
        }

        if let Some(id) = self.pages.get(&page_type) {
            return Ok(PageSelection::new(*id, page_type));
        }

        if page_type.is_lazily_created() {
            return Ok(PageSelection::pending(page_type));
        }

        Err(anyhow!(
            "No page id for {} pages. Pass --page-id or add it to {}",
            page_type,
            DEFAULT_CONFIG_NAME
        ))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            company_id: default_company_id(),
            history_depth: default_history_depth(),
            pages: BTreeMap::new(),
        }
    }
}
