//! In-memory [`RecordStore`] for tests and database-free runs.

use std::sync::RwLock;

use async_trait::async_trait;

use super::{check_required, RecordStore, StoreError};
use crate::models::UrlRecord;

#[derive(Default)]
pub struct InMemoryStore {
    rows: RwLock<Vec<UrlRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn insert(&self, path: &str, text: &str) -> Result<i64, StoreError> {
        check_required(path, text)?;

        let mut rows = self.rows.write().unwrap();
        let id = rows.last().map_or(1, |r| r.id + 1);
        rows.push(UrlRecord {
            id,
            path: path.to_string(),
            text_content: text.to_string(),
        });
        Ok(id)
    }

    async fn find_by_path(&self, path: &str) -> Result<Option<UrlRecord>, StoreError> {
        let rows = self.rows.read().unwrap();
        Ok(rows.iter().rev().find(|r| r.path == path).cloned())
    }
}
