//! Content cache and the content-loading collaborator seam.
//!
//! The cache lives at the `"svgCache"` state path, mapping a `filePath` to
//! raw SVG markup. It is unbounded and process-lifetime only: a memoization
//! layer, not a managed cache. The store never fetches content itself; a
//! [`ContentSource`] collaborator resolves locators to markup.

use crate::error::Result;
use crate::paths;
use crate::store::AppStore;
use serde_json::{Map, Value};

/// Collaborator contract: resolve a `filePath` locator to raw SVG markup.
pub trait ContentSource: Send + Sync {
    fn load(&self, file_path: &str) -> Result<String>;
}

impl AppStore {
    /// Cached markup for `file_path`, if any.
    ///
    /// Cache keys are looked up as literal map keys, not as dot paths:
    /// locators routinely contain dots.
    pub fn cached_content(&self, file_path: &str) -> Option<String> {
        match self.get(paths::SVG_CACHE)? {
            Value::Object(cache) => cache.get(file_path).and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    }

    /// Insert markup into the cache, notifying `"svgCache"` subscribers.
    pub fn cache_content(&self, file_path: &str, content: &str) {
        let mut entry = Map::new();
        entry.insert(file_path.to_string(), Value::String(content.to_string()));
        self.update(paths::SVG_CACHE, Value::Object(entry));
    }

    /// Cache-through read: return the cached markup, or load it via the
    /// collaborator and memoize the result.
    pub fn load_content(&self, file_path: &str, source: &dyn ContentSource) -> Result<String> {
        if let Some(content) = self.cached_content(file_path) {
            return Ok(content);
        }
        let content = source.load(file_path)?;
        self.cache_content(file_path, &content);
        Ok(content)
    }
}
