//! # Page Model
//!
//! Sections, page selection and structural components shared by the
//! editor core, the reference backend and the HTTP client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Free-form settings payload. Interpreted by the renderer, never here.
pub type Settings = Map<String, Value>;

/// Kind of content a section renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionType {
    Hero,
    ProductInformation,
    Gallery,
    FeaturedProducts,
    CollectionList,
    RichText,
    ImageWithText,
    Newsletter,
    Custom,
}

/// A unit of page content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,

    #[serde(rename = "type")]
    pub section_type: SectionType,

    pub name: String,

    #[serde(default = "default_visible")]
    pub visible: bool,

    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub sort_order: i64,
}

fn default_visible() -> bool {
    true
}

impl Section {
    pub fn new(id: impl Into<String>, section_type: SectionType, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            section_type,
            name: name.into(),
            visible: true,
            settings: Settings::new(),
            sort_order: 0,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Section shown on product pages when nothing could be loaded
    pub fn default_product_information() -> Self {
        Self::new(
            "product-information",
            SectionType::ProductInformation,
            "Product information",
        )
    }
}

/// Logical page being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageType {
    Home,
    Product,
    Cart,
    Checkout,
    Collection,
    AllCollections,
    AllProducts,
    Custom,
}

impl PageType {
    pub const BUILT_IN: [PageType; 7] = [
        PageType::Home,
        PageType::Product,
        PageType::Cart,
        PageType::Checkout,
        PageType::Collection,
        PageType::AllCollections,
        PageType::AllProducts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Home => "home",
            PageType::Product => "product",
            PageType::Cart => "cart",
            PageType::Checkout => "checkout",
            PageType::Collection => "collection",
            PageType::AllCollections => "all-collections",
            PageType::AllProducts => "all-products",
            PageType::Custom => "custom",
        }
    }

    /// Whether the backend record has to be created on first selection
    pub fn is_lazily_created(&self) -> bool {
        matches!(self, PageType::Custom)
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(PageType::Home),
            "product" => Ok(PageType::Product),
            "cart" => Ok(PageType::Cart),
            "checkout" => Ok(PageType::Checkout),
            "collection" => Ok(PageType::Collection),
            "all-collections" => Ok(PageType::AllCollections),
            "all-products" => Ok(PageType::AllProducts),
            "custom" => Ok(PageType::Custom),
            other => Err(format!("Unknown page type: {}", other)),
        }
    }
}

/// Backend identifier of a page, or a placeholder until it exists
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageId {
    Remote(u64),
    Placeholder(String),
}

impl PageId {
    pub fn placeholder(page_type: PageType) -> Self {
        PageId::Placeholder(format!("{}-pending", page_type))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PageId::Placeholder(_))
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageId::Remote(id) => write!(f, "{}", id),
            PageId::Placeholder(name) => f.write_str(name),
        }
    }
}

impl FromStr for PageId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(id) => PageId::Remote(id),
            Err(_) => PageId::Placeholder(s.to_string()),
        })
    }
}

impl From<u64> for PageId {
    fn from(id: u64) -> Self {
        PageId::Remote(id)
    }
}

/// Which page is currently open in the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSelection {
    pub page_id: PageId,
    pub page_type: PageType,
}

impl PageSelection {
    pub fn new(page_id: impl Into<PageId>, page_type: PageType) -> Self {
        Self {
            page_id: page_id.into(),
            page_type,
        }
    }

    /// Selection for a page whose backend record is not known yet
    pub fn pending(page_type: PageType) -> Self {
        Self {
            page_id: PageId::placeholder(page_type),
            page_type,
        }
    }
}

/// Backend record returned when a page is materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: u64,
}

/// Site-wide element slots edited alongside pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructuralSlot {
    Header,
    Footer,
    AnnouncementBar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralComponent {
    pub enabled: bool,

    #[serde(default)]
    pub settings: Settings,
}

impl Default for StructuralComponent {
    fn default() -> Self {
        Self {
            enabled: true,
            settings: Settings::new(),
        }
    }
}

/// Header, footer and other global elements, versioned by the backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralConfig {
    #[serde(default)]
    pub version: u64,

    #[serde(default)]
    pub components: BTreeMap<StructuralSlot, StructuralComponent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl StructuralConfig {
    pub fn component(&self, slot: StructuralSlot) -> Option<&StructuralComponent> {
        self.components.get(&slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_wire_format() {
        let json = json!({
            "id": "hero-1",
            "type": "product-information",
            "name": "Details",
            "visible": false,
            "settings": { "title": "Welcome", "columns": 3 },
            "sortOrder": 4
        });

        let section: Section = serde_json::from_value(json).unwrap();
        assert_eq!(section.section_type, SectionType::ProductInformation);
        assert!(!section.visible);
        assert_eq!(section.sort_order, 4);
        assert_eq!(section.settings["columns"], json!(3));

        let back = serde_json::to_value(&section).unwrap();
        assert_eq!(back["sortOrder"], json!(4));
        assert_eq!(back["type"], json!("product-information"));
    }

    #[test]
    fn test_section_defaults() {
        let section: Section =
            serde_json::from_str(r#"{"id":"a","type":"hero","name":"Hero"}"#).unwrap();
        assert!(section.visible);
        assert!(section.settings.is_empty());
        assert_eq!(section.sort_order, 0);
    }

    #[test]
    fn test_page_id_parsing() {
        assert_eq!("42".parse::<PageId>().unwrap(), PageId::Remote(42));
        assert_eq!(
            "custom-pending".parse::<PageId>().unwrap(),
            PageId::Placeholder("custom-pending".to_string())
        );
        assert!(PageId::placeholder(PageType::Custom).is_placeholder());
        assert_eq!(PageId::placeholder(PageType::Custom).to_string(), "custom-pending");
    }

    #[test]
    fn test_page_id_untagged_json() {
        let remote: PageId = serde_json::from_str("7").unwrap();
        assert_eq!(remote, PageId::Remote(7));

        let placeholder: PageId = serde_json::from_str("\"home-pending\"").unwrap();
        assert!(placeholder.is_placeholder());
    }

    #[test]
    fn test_page_type_round_trip_names() {
        for page_type in PageType::BUILT_IN {
            assert_eq!(page_type.as_str().parse::<PageType>().unwrap(), page_type);
            assert!(!page_type.is_lazily_created());
        }
        assert!(PageType::Custom.is_lazily_created());
        assert!("landing".parse::<PageType>().is_err());
    }

    #[test]
    fn test_structural_config_slot_keys() {
        let mut config = StructuralConfig::default();
        config
            .components
            .insert(StructuralSlot::AnnouncementBar, StructuralComponent::default());

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["components"]["announcement-bar"]["enabled"], json!(true));
        assert!(json.get("publishedAt").is_none());
    }
}
