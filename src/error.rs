//! Error types for the marketplace state engine.

use thiserror::Error;

/// Errors surfaced by store, reconciliation and export operations.
///
/// Storage failures around the favorites snapshot are deliberately NOT
/// represented here: they are logged and swallowed so the in-memory state
/// keeps functioning (see `favorites`).
#[derive(Debug, Error)]
pub enum StoreError {
    /// An import payload failed structural validation (missing or
    /// non-array `items`/`categories`). Canonical state is untouched.
    #[error("invalid data: {0}")]
    InvalidImport(String),

    /// A value could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An item or SVG content could not be resolved by a collaborator.
    #[error("content unavailable: {0}")]
    ContentUnavailable(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
