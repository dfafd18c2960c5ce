//! Combining raw source documents into the canonical catalog.
//!
//! At startup the loading collaborator fetches several JSON documents (one
//! per catalog section) and hands them here. Items are concatenated,
//! categories de-duplicated by first-seen id, counts computed over the
//! combined item set, and the result installed wholesale under `"svgData"`.

use crate::error::Result;
use crate::paths;
use crate::reconcile::ImportPayload;
use crate::store::AppStore;
use crate::types::{Category, Item};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Combine source documents into one item/category set.
///
/// Items keep source order; duplicate category ids keep the first-seen
/// record. Category counts are computed over the combined items, so
/// authoritative-looking counts in the sources are ignored.
pub fn combine_sources(sources: Vec<ImportPayload>) -> (Vec<Item>, Vec<Category>) {
    let mut items: Vec<Item> = Vec::new();
    let mut categories: Vec<Category> = Vec::new();
    let mut seen_categories: HashSet<String> = HashSet::new();

    for source in sources {
        for patch in source.items {
            let Some(id) = patch.id.clone() else {
                warn!("skipping source item without id");
                continue;
            };
            items.push(patch.into_item(id));
        }
        for patch in source.categories {
            let Some(id) = patch.id.clone() else {
                warn!("skipping source category without id");
                continue;
            };
            if !seen_categories.insert(id.clone()) {
                continue;
            }
            categories.push(patch.into_category(id));
        }
    }

    let mut counts: HashMap<String, u32> = HashMap::new();
    for item in &items {
        if item.category.is_empty() {
            continue;
        }
        *counts.entry(item.category.clone()).or_default() += 1;
    }
    for category in &mut categories {
        category.count = counts.get(&category.id).copied().unwrap_or(0);
    }

    (items, categories)
}

impl AppStore {
    /// Combine `sources` and install them as the canonical catalog, marking
    /// the data as loaded. Subscribers of `"svgData"` (and descendants via
    /// their own paths) observe the swap.
    pub fn load_sources(&self, sources: Vec<ImportPayload>) -> Result<()> {
        let (items, categories) = combine_sources(sources);
        debug!(
            items = items.len(),
            categories = categories.len(),
            "catalog sources combined"
        );

        let mut data = Map::new();
        data.insert("items".to_string(), serde_json::to_value(&items)?);
        data.insert("categories".to_string(), serde_json::to_value(&categories)?);
        data.insert("isLoaded".to_string(), Value::Bool(true));
        self.update(paths::SVG_DATA, Value::Object(data));
        Ok(())
    }
}
