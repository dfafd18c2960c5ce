//! Core data types: catalog records, import patches, pagination.
//!
//! All types serialize with camelCase field names to stay wire-compatible
//! with the marketplace JSON documents (`filePath`, `previewColor`, ...).

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A catalog record describing one SVG asset.
///
/// Metadata only: the raw markup is resolved separately through the content
/// cache. Canonical items never carry inline SVG content; that field exists
/// only on import/export documents (see [`ItemPatch`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique, stable id.
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Foreign key to `Category.id`.
    #[serde(default)]
    pub category: String,
    /// Non-negative; 0 means free.
    #[serde(default)]
    pub price: f64,
    /// Opaque content locator, also the content-cache key.
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub preview_color: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A named grouping of items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub icon: String,
    /// Derived: number of items whose `category` equals this id. Never
    /// authoritative input; recomputed from the item set after mutation.
    #[serde(default)]
    pub count: u32,
}

/// Partial item record as it appears in import documents.
///
/// Every field is optional so the merge can distinguish "absent" from
/// "present". The field list here is the explicit contract for which item
/// fields an import may overwrite.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub file_path: Option<String>,
    pub preview_color: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Inline markup carried by import payloads. Extracted into the content
    /// cache during reconciliation, never stored on the canonical item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg_content: Option<String>,
}

impl ItemPatch {
    /// Apply this patch to an existing item: each present field wins, each
    /// absent field leaves the canonical value untouched. `svg_content` is
    /// deliberately not applied here; reconciliation extracts it first.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(category) = &self.category {
            item.category = category.clone();
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(file_path) = &self.file_path {
            item.file_path = file_path.clone();
        }
        if let Some(preview_color) = &self.preview_color {
            item.preview_color = preview_color.clone();
        }
        if let Some(tags) = &self.tags {
            item.tags = tags.clone();
        }
    }

    /// Materialize a brand-new item from this patch. Missing required
    /// fields are defaulted and surface as warnings, not failures.
    pub fn into_item(self, id: String) -> Item {
        let mut missing: Vec<&str> = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.category.is_none() {
            missing.push("category");
        }
        if self.file_path.is_none() {
            missing.push("filePath");
        }
        if !missing.is_empty() {
            warn!(item = %id, fields = ?missing, "imported item missing fields");
        }

        Item {
            id,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            file_path: self.file_path.unwrap_or_default(),
            preview_color: self.preview_color.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
        }
    }
}

impl From<Item> for ItemPatch {
    fn from(item: Item) -> Self {
        ItemPatch {
            id: Some(item.id),
            name: Some(item.name),
            description: Some(item.description),
            category: Some(item.category),
            price: Some(item.price),
            file_path: Some(item.file_path),
            preview_color: Some(item.preview_color),
            tags: Some(item.tags),
            svg_content: None,
        }
    }
}

/// Partial category record as it appears in import documents.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub count: Option<u32>,
}

impl CategoryPatch {
    /// Apply this patch to an existing category; present fields win.
    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(color) = &self.color {
            category.color = color.clone();
        }
        if let Some(icon) = &self.icon {
            category.icon = icon.clone();
        }
        if let Some(count) = self.count {
            category.count = count;
        }
    }

    /// Materialize a brand-new category from this patch.
    pub fn into_category(self, id: String) -> Category {
        Category {
            id,
            name: self.name.unwrap_or_default(),
            color: self.color.unwrap_or_default(),
            icon: self.icon.unwrap_or_default(),
            count: self.count.unwrap_or_default(),
        }
    }
}

/// Pagination state for the catalog grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number.
    pub current_page: u32,
    pub items_per_page: u32,
    /// Derived: `max(1, ceil(filtered_count / items_per_page))`.
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            current_page: 1,
            items_per_page: 8,
            total_pages: 1,
        }
    }
}

/// Counters shown on the admin data-summary panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogSummary {
    pub total_items: usize,
    pub free_items: usize,
    pub total_categories: usize,
    pub empty_categories: usize,
}
