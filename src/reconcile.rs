//! Reconciliation of imported data with canonical state.
//!
//! An import payload is either merged (upsert-by-id, imported fields win) or
//! wholesale replaces the canonical item/category arrays. Either way, inline
//! SVG content is extracted into the content cache and stripped from the
//! stored record, and every category count is recomputed from scratch over
//! the resulting item list. Structural validation happens before any state
//! is touched, so a rejected payload never leaves a partial mutation behind.

use crate::error::{Result, StoreError};
use crate::paths;
use crate::store::AppStore;
use crate::types::{Category, CategoryPatch, Item, ItemPatch};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// An externally supplied import document.
///
/// `items` and `categories` are required; `settings` is accepted but has no
/// reconciliation effect (deliberately inert, kept for round-trip fidelity
/// with exported documents).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ImportPayload {
    pub items: Vec<ItemPatch>,
    pub categories: Vec<CategoryPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}

impl ImportPayload {
    /// Structural validation: a non-null JSON object with `items` and
    /// `categories` both present and array-typed. No per-element schema
    /// checks; malformed elements surface later as warnings.
    pub fn is_valid(value: &Value) -> bool {
        let Value::Object(map) = value else { return false };
        map.get("items").is_some_and(Value::is_array)
            && map.get("categories").is_some_and(Value::is_array)
    }

    /// Parse a payload from JSON text. Fails with [`StoreError::InvalidImport`]
    /// on structural problems; individual malformed entries are skipped with
    /// a warning instead of failing the whole import.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| StoreError::InvalidImport(format!("not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Parse a payload from an already-decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        if !Self::is_valid(&value) {
            return Err(StoreError::InvalidImport(
                "payload must be an object with `items` and `categories` arrays".into(),
            ));
        }
        let Value::Object(mut map) = value else { unreachable!("validated as object") };

        let items = collect_entries(map.remove("items"), "item");
        let categories = collect_entries(map.remove("categories"), "category");
        let settings = map.remove("settings");

        Ok(ImportPayload { items, categories, settings })
    }
}

fn collect_entries<T: serde::de::DeserializeOwned>(entries: Option<Value>, kind: &str) -> Vec<T> {
    let Some(Value::Array(entries)) = entries else { return Vec::new() };
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                warn!(index, kind, %error, "skipping malformed import entry");
                None
            }
        })
        .collect()
}

/// Outcome counters for one merge or replace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub items_added: usize,
    pub items_updated: usize,
    pub categories_added: usize,
    pub categories_updated: usize,
}

impl AppStore {
    /// Upsert-merge `payload` into canonical state.
    ///
    /// Items and categories are matched by id: an existing record receives
    /// the imported fields (present fields win, absent fields survive), an
    /// unknown id is appended. Applying the same payload twice yields the
    /// same state as applying it once.
    pub fn merge_import(&self, payload: ImportPayload) -> Result<ImportReport> {
        let mut report = ImportReport::default();
        let mut extracted: Vec<(String, String)> = Vec::new();

        let mut items = self.items();
        let mut index_by_id: HashMap<String, usize> = items
            .iter()
            .enumerate()
            .map(|(index, item)| (item.id.clone(), index))
            .collect();

        for mut patch in payload.items {
            let Some(id) = patch.id.clone() else {
                warn!("skipping imported item without id");
                continue;
            };
            let svg_content = patch.svg_content.take();

            match index_by_id.get(&id) {
                Some(&index) => {
                    patch.apply_to(&mut items[index]);
                    report.items_updated += 1;
                    if let Some(content) = svg_content {
                        stage_content(&items[index].file_path, content, &mut extracted);
                    }
                }
                None => {
                    let item = patch.into_item(id.clone());
                    if let Some(content) = svg_content {
                        stage_content(&item.file_path, content, &mut extracted);
                    }
                    index_by_id.insert(id, items.len());
                    items.push(item);
                    report.items_added += 1;
                }
            }
        }

        let mut categories = self.categories();
        let mut category_index: HashMap<String, usize> = categories
            .iter()
            .enumerate()
            .map(|(index, category)| (category.id.clone(), index))
            .collect();

        for patch in payload.categories {
            let Some(id) = patch.id.clone() else {
                warn!("skipping imported category without id");
                continue;
            };
            match category_index.get(&id) {
                Some(&index) => {
                    patch.apply_to(&mut categories[index]);
                    report.categories_updated += 1;
                }
                None => {
                    category_index.insert(id.clone(), categories.len());
                    categories.push(patch.into_category(id));
                    report.categories_added += 1;
                }
            }
        }

        for (file_path, content) in extracted {
            self.cache_content(&file_path, &content);
        }
        self.set_json(paths::ITEMS, &items)?;
        self.set_json(paths::CATEGORIES, &categories)?;
        self.recompute_category_counts()?;

        debug!(?report, "merge import applied");
        Ok(report)
    }

    /// Wholesale replace canonical items and categories with `payload`.
    /// The same content-extraction and count-recompute rules as
    /// [`merge_import`](Self::merge_import) apply.
    pub fn replace_import(&self, payload: ImportPayload) -> Result<ImportReport> {
        let mut report = ImportReport::default();
        let mut extracted: Vec<(String, String)> = Vec::new();

        let mut items = Vec::with_capacity(payload.items.len());
        for mut patch in payload.items {
            let Some(id) = patch.id.clone() else {
                warn!("skipping imported item without id");
                continue;
            };
            let svg_content = patch.svg_content.take();
            let item = patch.into_item(id);
            if let Some(content) = svg_content {
                stage_content(&item.file_path, content, &mut extracted);
            }
            items.push(item);
            report.items_added += 1;
        }

        let mut categories: Vec<Category> = Vec::with_capacity(payload.categories.len());
        for patch in payload.categories {
            let Some(id) = patch.id.clone() else {
                warn!("skipping imported category without id");
                continue;
            };
            categories.push(patch.into_category(id));
            report.categories_added += 1;
        }

        for (file_path, content) in extracted {
            self.cache_content(&file_path, &content);
        }
        self.set_json(paths::ITEMS, &items)?;
        self.set_json(paths::CATEGORIES, &categories)?;
        self.recompute_category_counts()?;

        debug!(?report, "replace import applied");
        Ok(report)
    }

    /// Recompute every category's `count` from scratch over the current item
    /// list and write the categories back. Counts are never incremental:
    /// this guarantees correctness regardless of mutation order.
    pub fn recompute_category_counts(&self) -> Result<()> {
        let items = self.items();
        let mut counts: HashMap<String, u32> = HashMap::new();
        for item in &items {
            if item.category.is_empty() {
                continue;
            }
            *counts.entry(item.category.clone()).or_default() += 1;
        }

        let mut categories = self.categories();
        for category in &mut categories {
            category.count = counts.get(&category.id).copied().unwrap_or(0);
        }
        self.set_json(paths::CATEGORIES, &categories)
    }

    /// Replace-or-append a single item by id (the admin editor save path),
    /// then refresh category counts.
    pub fn upsert_item(&self, item: Item) -> Result<()> {
        let mut items = self.items();
        match items.iter().position(|existing| existing.id == item.id) {
            Some(index) => items[index] = item,
            None => items.push(item),
        }
        self.set_json(paths::ITEMS, &items)?;
        self.recompute_category_counts()
    }
}

/// Queue extracted markup for the cache, keyed by the record's effective
/// locator. Content without a locator cannot be cached.
fn stage_content(file_path: &str, content: String, extracted: &mut Vec<(String, String)>) {
    if file_path.is_empty() {
        warn!("imported item carries svgContent but no filePath; content dropped");
        return;
    }
    extracted.push((file_path.to_string(), content));
}
