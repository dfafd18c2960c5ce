//! Derived read-only views over the catalog: filtering, pagination, lookups.
//!
//! Nothing here mutates canonical state except the single self-correcting
//! side effect of repairing `pagination.totalPages` when the filtered set
//! size changes.

use crate::paths;
use crate::store::AppStore;
use crate::types::{CatalogSummary, Item};
use serde_json::json;

impl AppStore {
    /// Items surviving the active category and search filters, in canonical
    /// order.
    ///
    /// The category filter keeps items whose `category` matches the current
    /// selection (skipped for the `"all"` sentinel); the search filter keeps
    /// items where the lowercased query is a substring of the name,
    /// description or any tag.
    pub fn filtered_items(&self) -> Vec<Item> {
        let mut items = self.items();

        let current_category = self
            .get_as::<String>(paths::CURRENT_CATEGORY)
            .unwrap_or_else(|| paths::ALL_CATEGORIES.to_string());
        if !current_category.is_empty() && current_category != paths::ALL_CATEGORIES {
            items.retain(|item| item.category == current_category);
        }

        let query = self.get_as::<String>(paths::SEARCH_QUERY).unwrap_or_default();
        if !query.is_empty() {
            let query = query.to_lowercase();
            items.retain(|item| {
                item.name.to_lowercase().contains(&query)
                    || item.description.to_lowercase().contains(&query)
                    || item.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
            });
        }

        items
    }

    /// The slice of [`filtered_items`](Self::filtered_items) for the current
    /// page.
    ///
    /// Recomputes `totalPages = max(1, ceil(n / itemsPerPage))` and writes it
    /// back through the ordinary `set` path when it drifted, so pagination
    /// subscribers re-render. `currentPage` itself is never clamped: a page
    /// beyond the available data yields an empty slice.
    pub fn paginated_items(&self) -> Vec<Item> {
        let filtered = self.filtered_items();
        let pagination = self.pagination();
        let items_per_page = pagination.items_per_page.max(1) as usize;

        let total_pages = filtered.len().div_ceil(items_per_page).max(1) as u32;
        if pagination.total_pages != total_pages {
            self.set(paths::TOTAL_PAGES, json!(total_pages));
        }

        let start = pagination.current_page.saturating_sub(1) as usize * items_per_page;
        filtered.into_iter().skip(start).take(items_per_page).collect()
    }

    /// Reset category, search and page to their defaults.
    pub fn reset_filters(&self) {
        self.set(paths::SEARCH_QUERY, json!(""));
        self.set(paths::CURRENT_CATEGORY, json!(paths::ALL_CATEGORIES));
        self.set(paths::CURRENT_PAGE, json!(1));
    }

    /// Look up a catalog item by id.
    pub fn item_by_id(&self, id: &str) -> Option<Item> {
        self.items().into_iter().find(|item| item.id == id)
    }

    /// Counters for the admin data-summary panel.
    pub fn summary(&self) -> CatalogSummary {
        let items = self.items();
        let categories = self.categories();
        CatalogSummary {
            total_items: items.len(),
            free_items: items.iter().filter(|item| item.price == 0.0).count(),
            total_categories: categories.len(),
            empty_categories: categories.iter().filter(|c| c.count == 0).count(),
        }
    }
}
