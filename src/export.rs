//! Building export documents.
//!
//! An export carries selectable subsets of the catalog plus a provenance
//! `settings` block (app version, export date, inclusion flags). The block
//! is consumed by nothing on import; it exists for round-trip debugging.

use crate::content::ContentSource;
use crate::error::Result;
use crate::store::AppStore;
use crate::types::{Category, Item};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which subsets of the catalog to export.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub include_items: bool,
    pub include_categories: bool,
    pub include_settings: bool,
    /// Inline the raw SVG markup on each item (larger output). Content is
    /// resolved through the cache and, when provided, the content source.
    pub include_svg_content: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            include_items: true,
            include_categories: true,
            include_settings: true,
            include_svg_content: false,
        }
    }
}

/// An item as it appears in an export document: the canonical record plus
/// optional inline markup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportItem {
    #[serde(flatten)]
    pub item: Item,
    #[serde(rename = "svgContent", skip_serializing_if = "Option::is_none")]
    pub svg_content: Option<String>,
}

/// Inclusion flags recorded in the provenance block.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFlags {
    pub included_svgs: bool,
    pub included_categories: bool,
    pub included_settings: bool,
    pub included_svg_content: bool,
}

/// Export provenance: purely informational, ignored on import.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    pub app_version: String,
    pub export_date: DateTime<Utc>,
    pub export_options: ExportFlags,
}

/// A complete export document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ExportItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ExportSettings>,
}

impl ExportDocument {
    /// Pretty-printed JSON, the on-disk export format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl AppStore {
    /// Assemble an export document per `options`.
    ///
    /// When inline content is requested, each item's markup is resolved
    /// through the cache and `source`; an item whose content cannot be
    /// loaded is exported without it rather than failing the export.
    pub fn build_export(
        &self,
        options: &ExportOptions,
        source: Option<&dyn ContentSource>,
    ) -> ExportDocument {
        let items = options.include_items.then(|| {
            self.items()
                .into_iter()
                .map(|item| {
                    let svg_content = if options.include_svg_content {
                        self.resolve_export_content(&item, source)
                    } else {
                        None
                    };
                    ExportItem { item, svg_content }
                })
                .collect()
        });

        let categories = options.include_categories.then(|| self.categories());

        let settings = options.include_settings.then(|| ExportSettings {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            export_date: Utc::now(),
            export_options: ExportFlags {
                included_svgs: options.include_items,
                included_categories: options.include_categories,
                included_settings: options.include_settings,
                included_svg_content: options.include_svg_content,
            },
        });

        ExportDocument { items, categories, settings }
    }

    fn resolve_export_content(&self, item: &Item, source: Option<&dyn ContentSource>) -> Option<String> {
        if let Some(cached) = self.cached_content(&item.file_path) {
            return Some(cached);
        }
        let source = source?;
        match self.load_content(&item.file_path, source) {
            Ok(content) => Some(content),
            Err(error) => {
                warn!(item = %item.id, %error, "could not load SVG content for export");
                None
            }
        }
    }
}
