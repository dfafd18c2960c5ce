//! Tests for derived views (filtering, pagination) and the favorites ledger.
//!
//! These tests verify that:
//! 1. Filtering applies category then search, preserving canonical order
//! 2. Filter results are always a subset of the canonical item list
//! 3. Pagination derives totalPages with a floor of 1 and repairs the store
//! 4. An out-of-range currentPage yields an empty slice, not an error
//! 5. Favorites toggle, notify, and persist across a store reopen
//! 6. A missing or corrupt favorites snapshot falls back to empty

use serde_json::json;
use std::fs;
use std::sync::{Arc, Mutex};
use svgmarket::{paths, AppStore, Item, StoreConfig};
use tempfile::TempDir;

fn item(id: &str, name: &str, category: &str, tags: &[&str]) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} asset"),
        category: category.to_string(),
        price: 0.0,
        file_path: format!("svgs/{id}.svg"),
        preview_color: "blue".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn catalog_store() -> AppStore {
    let store = AppStore::default();
    store
        .set_json(
            paths::ITEMS,
            &vec![
                item("a1", "Arrow Left", "icons", &["navigation"]),
                item("a2", "Arrow Right", "icons", &["navigation"]),
                item("l1", "Acme Logo", "logos", &["brand"]),
                item("i1", "Mountain Scene", "illustrations", &["nature", "arrowhead"]),
            ],
        )
        .unwrap();
    store
}

fn persistent_store(dir: &TempDir) -> AppStore {
    AppStore::new(StoreConfig {
        data_dir: Some(dir.path().to_path_buf()),
    })
}

// =============================================================================
// FILTERING
// =============================================================================

#[test]
fn test_no_filters_returns_entire_catalog_in_order() {
    let store = catalog_store();

    let ids: Vec<String> = store.filtered_items().into_iter().map(|i| i.id).collect();

    assert_eq!(ids, vec!["a1", "a2", "l1", "i1"]);
}

#[test]
fn test_category_filter() {
    let store = catalog_store();
    store.set(paths::CURRENT_CATEGORY, json!("icons"));

    let ids: Vec<String> = store.filtered_items().into_iter().map(|i| i.id).collect();

    assert_eq!(ids, vec!["a1", "a2"]);
}

#[test]
fn test_search_matches_name_description_and_tags_case_insensitively() {
    let store = catalog_store();

    store.set(paths::SEARCH_QUERY, json!("ARROW"));
    let ids: Vec<String> = store.filtered_items().into_iter().map(|i| i.id).collect();
    // "arrowhead" tag pulls in the illustration too.
    assert_eq!(ids, vec!["a1", "a2", "i1"]);

    store.set(paths::SEARCH_QUERY, json!("brand"));
    let ids: Vec<String> = store.filtered_items().into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec!["l1"]);
}

#[test]
fn test_category_and_search_compose() {
    let store = catalog_store();
    store.set(paths::CURRENT_CATEGORY, json!("icons"));
    store.set(paths::SEARCH_QUERY, json!("right"));

    let ids: Vec<String> = store.filtered_items().into_iter().map(|i| i.id).collect();

    assert_eq!(ids, vec!["a2"]);
}

#[test]
fn test_narrowing_the_query_never_grows_the_result() {
    let store = catalog_store();

    store.set(paths::SEARCH_QUERY, json!("arrow"));
    let broad = store.filtered_items().len();
    store.set(paths::SEARCH_QUERY, json!("arrowhead"));
    let narrow = store.filtered_items().len();

    assert!(narrow <= broad);
    // And both are subsets of the canonical list.
    assert!(broad <= store.items().len());
}

// =============================================================================
// PAGINATION
// =============================================================================

#[test]
fn test_total_pages_is_ceil_with_floor_one() {
    let store = catalog_store();
    store.set(paths::ITEMS_PER_PAGE, json!(3));

    let page = store.paginated_items();

    assert_eq!(page.len(), 3);
    assert_eq!(store.pagination().total_pages, 2);
}

#[test]
fn test_empty_filtered_set_keeps_one_page() {
    let store = catalog_store();
    store.set(paths::SEARCH_QUERY, json!("no such thing"));

    let page = store.paginated_items();

    assert!(page.is_empty());
    assert_eq!(store.pagination().total_pages, 1);
}

#[test]
fn test_second_page_slice() {
    let store = catalog_store();
    store.set(paths::ITEMS_PER_PAGE, json!(3));
    store.set(paths::CURRENT_PAGE, json!(2));

    let ids: Vec<String> = store.paginated_items().into_iter().map(|i| i.id).collect();

    assert_eq!(ids, vec!["i1"]);
}

#[test]
fn test_out_of_range_page_yields_empty_slice_without_clamping() {
    let store = catalog_store();
    store.set(paths::CURRENT_PAGE, json!(9));

    let page = store.paginated_items();

    assert!(page.is_empty());
    // The engine repairs totalPages but never touches currentPage.
    assert_eq!(store.pagination().current_page, 9);
}

#[test]
fn test_total_pages_repair_notifies_pagination_subscribers() {
    let store = catalog_store();
    store.set(paths::ITEMS_PER_PAGE, json!(2));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.subscribe(paths::PAGINATION, move |value| {
        sink.lock().unwrap().push(value.clone());
    });

    store.paginated_items();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["totalPages"], json!(2));
}

#[test]
fn test_total_pages_not_rewritten_when_unchanged() {
    let store = catalog_store();
    store.set(paths::ITEMS_PER_PAGE, json!(2));
    store.paginated_items();

    let seen = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&seen);
    store.subscribe(paths::TOTAL_PAGES, move |_| *sink.lock().unwrap() += 1);

    store.paginated_items();

    assert_eq!(*seen.lock().unwrap(), 0);
}

#[test]
fn test_reset_filters_restores_defaults() {
    let store = catalog_store();
    store.set(paths::CURRENT_CATEGORY, json!("logos"));
    store.set(paths::SEARCH_QUERY, json!("acme"));
    store.set(paths::CURRENT_PAGE, json!(3));

    store.reset_filters();

    assert_eq!(store.get(paths::CURRENT_CATEGORY), Some(json!("all")));
    assert_eq!(store.get(paths::SEARCH_QUERY), Some(json!("")));
    assert_eq!(store.pagination().current_page, 1);
    assert_eq!(store.filtered_items().len(), 4);
}

// =============================================================================
// LOOKUPS AND SUMMARY
// =============================================================================

#[test]
fn test_item_by_id() {
    let store = catalog_store();

    assert_eq!(store.item_by_id("l1").map(|i| i.name), Some("Acme Logo".to_string()));
    assert!(store.item_by_id("missing").is_none());
}

#[test]
fn test_catalog_summary() {
    let store = catalog_store();
    store
        .set_json(
            paths::CATEGORIES,
            &json!([{"id": "icons"}, {"id": "logos"}, {"id": "empty"}]),
        )
        .unwrap();
    store.recompute_category_counts().unwrap();

    let summary = store.summary();

    assert_eq!(summary.total_items, 4);
    assert_eq!(summary.free_items, 4);
    assert_eq!(summary.total_categories, 3);
    assert_eq!(summary.empty_categories, 1);
}

// =============================================================================
// FAVORITES
// =============================================================================

#[test]
fn test_toggle_favorite_flips_membership() {
    let store = AppStore::default();

    assert!(store.toggle_favorite("x"));
    assert!(store.is_favorite("x"));
    assert!(!store.toggle_favorite("x"));
    assert!(!store.is_favorite("x"));
}

#[test]
fn test_toggle_notifies_favorites_subscribers() {
    let store = AppStore::default();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.subscribe(paths::FAVORITES, move |value| {
        sink.lock().unwrap().push(value.clone());
    });

    store.toggle_favorite("x");
    store.toggle_favorite("y");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1], json!(["x", "y"]));
}

#[test]
fn test_favorites_persist_across_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let store = persistent_store(&dir);
        store.toggle_favorite("kept");
        store.toggle_favorite("dropped");
        store.toggle_favorite("dropped");
    }

    let reopened = persistent_store(&dir);
    assert!(reopened.is_favorite("kept"));
    assert!(!reopened.is_favorite("dropped"));
    assert_eq!(reopened.favorites(), vec!["kept".to_string()]);
}

#[test]
fn test_corrupt_snapshot_falls_back_to_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("svg_marketplace_favorites.json"), "{not json").unwrap();

    let store = persistent_store(&dir);

    assert!(store.favorites().is_empty());
    // The ledger still works and overwrites the bad snapshot.
    assert!(store.toggle_favorite("x"));
    let reopened = persistent_store(&dir);
    assert!(reopened.is_favorite("x"));
}

#[test]
fn test_memory_only_store_swallows_missing_storage() {
    let store = AppStore::new(StoreConfig { data_dir: None });

    assert!(store.toggle_favorite("x"));
    assert!(store.is_favorite("x"));
}
