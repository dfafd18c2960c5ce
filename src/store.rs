//! Path-addressed observable store.
//!
//! The store is the single source of truth for all reactive application
//! state, addressed by dot-delimited path strings (e.g. `"svgData.items"`).
//! Subscribers register against an exact path and are notified synchronously
//! on every mutation, followed by subscribers of each ancestor path and
//! finally the `"*"` sentinel subscribers.

use crate::error::Result;
use crate::favorites;
use crate::paths;
use crate::types::{Category, Item, Pagination};
use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Store configuration.
#[derive(Clone, Debug, Default)]
pub struct StoreConfig {
    /// Directory holding the persisted favorites snapshot. `None` disables
    /// persistence; favorites then live only for the process lifetime.
    pub data_dir: Option<PathBuf>,
}

/// Identifies one registered subscriber. Returned by [`AppStore::subscribe`]
/// and consumed by [`AppStore::unsubscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Arc<dyn Fn(&Value) + Send + Sync>;

struct Subscriber {
    id: SubscriptionId,
    callback: Callback,
}

/// The reactive application state container.
///
/// Mutation is serialized by an internal lock, but the notification protocol
/// still assumes one logical thread of control: callbacks run synchronously
/// on the mutating caller, with no batching, debouncing or deduplication. A
/// subscriber may itself call `set` (or subscribe/unsubscribe) during
/// notification; cycles introduced that way are a caller error, not a fault
/// the store detects.
pub struct AppStore {
    config: StoreConfig,

    /// The state tree. Always a JSON object at the root.
    state: RwLock<Value>,

    /// Subscribers keyed by exact path string (plus the `"*"` sentinel).
    subscribers: Mutex<HashMap<String, Vec<Subscriber>>>,

    next_subscription: AtomicU64,
}

impl AppStore {
    /// Create a store with the default state shape, loading the persisted
    /// favorites snapshot if the config names a data directory. A missing or
    /// corrupt snapshot falls back to an empty set.
    pub fn new(config: StoreConfig) -> Self {
        let mut state = default_state();
        if let Some(saved) = favorites::load_snapshot(config.data_dir.as_deref()) {
            write_leaf(&mut state, paths::FAVORITES, json!(saved));
        }

        AppStore {
            config,
            state: RwLock::new(state),
            subscribers: Mutex::new(HashMap::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    pub(crate) fn data_dir(&self) -> Option<&Path> {
        self.config.data_dir.as_deref()
    }

    // --- Reads ---

    /// Get the value at `path`, or `None` if any segment is absent. Never
    /// fails on an unknown path.
    pub fn get(&self, path: &str) -> Option<Value> {
        let state = self.state.read();
        let mut current = &*state;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        Some(current.clone())
    }

    /// Typed read: deserialize the value at `path`. Returns `None` when the
    /// path is absent or the value does not match `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        serde_json::from_value(self.get(path)?).ok()
    }

    /// A full clone of the state tree (debugging aid; also what `"*"`
    /// subscribers receive).
    pub fn snapshot(&self) -> Value {
        self.state.read().clone()
    }

    // --- Writes ---

    /// Set the value at `path`, creating missing intermediate objects, then
    /// synchronously notify subscribers: exact path first, then each
    /// ancestor (with the value re-read at that ancestor), then `"*"`.
    pub fn set(&self, path: &str, value: Value) {
        {
            let mut state = self.state.write();
            write_leaf(&mut state, path, value.clone());
        }
        self.notify(path, &value);
    }

    /// [`set`](Self::set) for any serializable value.
    pub fn set_json<T: Serialize>(&self, path: &str, value: &T) -> Result<()> {
        self.set(path, serde_json::to_value(value)?);
        Ok(())
    }

    /// Shallow-merge `updates` into the object at `path`. When the current
    /// value is not an object (arrays included) the value is replaced
    /// wholesale; arrays are never merged element-wise.
    pub fn update(&self, path: &str, updates: Value) {
        let merged = match (self.get(path), updates) {
            (Some(Value::Object(mut current)), Value::Object(partial)) => {
                for (key, value) in partial {
                    current.insert(key, value);
                }
                Value::Object(current)
            }
            (_, updates) => updates,
        };
        self.set(path, merged);
    }

    // --- Subscriptions ---

    /// Register `callback` under the exact path string `path` (or the
    /// literal `"*"` sentinel to observe every mutation with a full state
    /// snapshot). Callbacks fire in registration order.
    pub fn subscribe<F>(&self, path: &str, callback: F) -> SubscriptionId
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .lock()
            .entry(path.to_string())
            .or_default()
            .push(Subscriber {
                id,
                callback: Arc::new(callback),
            });
        id
    }

    /// Remove a subscriber. Unsubscribing an unknown or already-removed id
    /// is an idempotent no-op.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subscribers = self.subscribers.lock();
        for list in subscribers.values_mut() {
            list.retain(|subscriber| subscriber.id != id);
        }
    }

    /// Number of active subscriptions across all paths.
    pub fn subscription_count(&self) -> usize {
        self.subscribers.lock().values().map(Vec::len).sum()
    }

    // --- Typed convenience views ---

    pub fn items(&self) -> Vec<Item> {
        self.get_as(paths::ITEMS).unwrap_or_default()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.get_as(paths::CATEGORIES).unwrap_or_default()
    }

    pub fn pagination(&self) -> Pagination {
        self.get_as(paths::PAGINATION).unwrap_or_default()
    }

    // --- Notification ---

    fn notify(&self, path: &str, value: &Value) {
        // Exact-path subscribers see the new leaf value.
        self.fire(path, value);

        // Ancestor subscribers see the updated container, re-read from the
        // store at each level (not the leaf value). Nearest ancestor first.
        let mut current = path;
        while let Some((parent, _)) = current.rsplit_once('.') {
            let parent_value = self.get(parent).unwrap_or(Value::Null);
            self.fire(parent, &parent_value);
            current = parent;
        }

        // Sentinel subscribers see the full state snapshot.
        let snapshot = self.snapshot();
        self.fire(paths::ALL, &snapshot);
    }

    fn fire(&self, path: &str, value: &Value) {
        // Snapshot the callback list before invoking anything: callbacks may
        // reentrantly subscribe, unsubscribe or mutate the store, so no lock
        // is held while they run.
        let callbacks: Vec<Callback> = {
            let subscribers = self.subscribers.lock();
            match subscribers.get(path) {
                Some(list) => list.iter().map(|s| Arc::clone(&s.callback)).collect(),
                None => return,
            }
        };

        for callback in callbacks {
            // One panicking handler must not prevent its siblings or the
            // rest of the ancestor walk from running.
            if catch_unwind(AssertUnwindSafe(|| callback(value))).is_err() {
                warn!(path, "subscriber panicked during notification");
            }
        }
    }
}

impl Default for AppStore {
    fn default() -> Self {
        AppStore::new(StoreConfig::default())
    }
}

/// The initial state tree.
fn default_state() -> Value {
    json!({
        "isLoading": false,
        "currentCategory": paths::ALL_CATEGORIES,
        "searchQuery": "",
        "pagination": Pagination::default(),
        "svgData": {
            "items": [],
            "categories": [],
            "isLoaded": false,
        },
        "favorites": [],
        "svgCache": {},
    })
}

/// Write `value` at `path` inside `tree`, creating intermediate objects as
/// needed. A non-object intermediate is replaced by an empty object.
fn write_leaf(tree: &mut Value, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            ensure_object(tree).insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = ensure_object(tree)
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            write_leaf(child, rest, value);
        }
    }
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just made an object"),
    }
}
