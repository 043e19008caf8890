//! Record storage.
//!
//! The [`RecordStore`] trait is the only way the rest of the crate touches
//! persisted records. The server receives a store object at startup instead
//! of reaching for a global handle.
//!
//! | Implementation | Backing |
//! |----------------|---------|
//! | [`SqliteStore`] | SQLite file through a `sqlx` pool |
//! | [`InMemoryStore`] | `Vec` behind a `RwLock` |

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::UrlRecord;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Append-only storage of extracted pages, keyed by submitted URL.
///
/// Rows are never updated or deleted. Several rows may share a path;
/// lookups return the most recently inserted one.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Appends a row and returns its id.
    async fn insert(&self, path: &str, text: &str) -> Result<i64, StoreError>;

    /// Exact-match lookup, most recent row first.
    async fn find_by_path(&self, path: &str) -> Result<Option<UrlRecord>, StoreError>;

    /// Releases the underlying connections.
    async fn close(&self) {}
}

/// Shared required-field check run by every implementation before writing.
pub(crate) fn check_required(path: &str, text: &str) -> Result<(), StoreError> {
    if path.trim().is_empty() {
        return Err(StoreError::EmptyField("path"));
    }
    if text.trim().is_empty() {
        return Err(StoreError::EmptyField("text_content"));
    }
    Ok(())
}
