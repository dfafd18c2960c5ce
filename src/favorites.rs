//! Favorites ledger: a toggleable id set with a persisted JSON snapshot.
//!
//! The snapshot is the only durable part of the state: a JSON array of item
//! ids under a fixed, versionless file name, read once at startup and
//! overwritten wholesale on every toggle. Storage failures are logged and
//! swallowed; the in-memory set keeps working regardless.

use crate::paths;
use crate::store::AppStore;
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Fixed snapshot file name inside the configured data directory.
const SNAPSHOT_FILE: &str = "svg_marketplace_favorites.json";

/// Load the persisted favorites snapshot. Returns `None` when persistence is
/// disabled, the file does not exist yet, or the file is unreadable/corrupt
/// (the latter two are warned about, never raised).
pub(crate) fn load_snapshot(data_dir: Option<&Path>) -> Option<Vec<String>> {
    let path = data_dir?.join(SNAPSHOT_FILE);
    if !path.exists() {
        return None;
    }
    let parsed = fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()));
    match parsed {
        Ok(favorites) => Some(favorites),
        Err(error) => {
            warn!(%error, path = %path.display(), "failed to load favorites snapshot");
            None
        }
    }
}

fn save_snapshot(data_dir: &Path, favorites: &[String]) {
    let path = data_dir.join(SNAPSHOT_FILE);
    let written = fs::create_dir_all(data_dir)
        .map_err(|e| e.to_string())
        .and_then(|_| serde_json::to_string(favorites).map_err(|e| e.to_string()))
        .and_then(|text| fs::write(&path, text).map_err(|e| e.to_string()));
    if let Err(error) = written {
        warn!(%error, path = %path.display(), "failed to save favorites snapshot");
    }
}

impl AppStore {
    /// Flip membership of `id` in the favorites set. Notifies `"favorites"`
    /// subscribers and persists the updated snapshot before returning.
    /// Returns whether the id is now favorited.
    pub fn toggle_favorite(&self, id: &str) -> bool {
        let mut favorites = self.favorites();
        let now_favorite = match favorites.iter().position(|fav| fav == id) {
            Some(index) => {
                favorites.remove(index);
                false
            }
            None => {
                favorites.push(id.to_string());
                true
            }
        };

        self.set(paths::FAVORITES, json!(favorites));

        if let Some(dir) = self.data_dir() {
            save_snapshot(dir, &favorites);
        }

        now_favorite
    }

    /// Pure membership test, no side effects.
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites().iter().any(|fav| fav == id)
    }

    /// The current favorited ids.
    pub fn favorites(&self) -> Vec<String> {
        self.get_as(paths::FAVORITES).unwrap_or_default()
    }
}
