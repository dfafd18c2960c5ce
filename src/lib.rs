//! Reactive state store and catalog engine for the SVG marketplace.
//!
//! Provides a unified core for:
//! - A path-addressed observable store with synchronous subscriber
//!   notification (exact path, ancestor chain, `"*"` sentinel)
//! - Derived catalog views: category/search filtering and pagination
//! - Import reconciliation: upsert-merge or wholesale replace, with inline
//!   SVG content extraction and category-count recomputation
//! - A favorites ledger with a persisted JSON snapshot
//! - Export document assembly with selectable subsets and provenance
//!
//! UI rendering, network fetching and file handling are external
//! collaborators: they read derived views, subscribe to store paths, and
//! push data in through the same mutation surface as everything else.

pub mod content;
pub mod error;
pub mod export;
pub mod ingest;
pub mod paths;
pub mod reconcile;
pub mod store;
pub mod types;

mod favorites;
mod queries;

pub use content::ContentSource;
pub use error::{Result, StoreError};
pub use export::{ExportDocument, ExportFlags, ExportItem, ExportOptions, ExportSettings};
pub use reconcile::{ImportPayload, ImportReport};
pub use store::{AppStore, StoreConfig, SubscriptionId};
pub use types::{CatalogSummary, Category, CategoryPatch, Item, ItemPatch, Pagination};
