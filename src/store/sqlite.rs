//! SQLite-backed [`RecordStore`].

use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

use super::{check_required, RecordStore, StoreError};
use crate::config::DbConfig;
use crate::migrate;
use crate::models::UrlRecord;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database file and applies the schema.
    pub async fn open(config: &DbConfig) -> Result<Self> {
        let pool = connect(config).await?;
        migrate::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Connects a pool to the configured database file, creating the file and
/// its parent directory when missing.
pub async fn connect(config: &DbConfig) -> Result<SqlitePool> {
    let db_path = &config.path;

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn insert(&self, path: &str, text: &str) -> Result<i64, StoreError> {
        check_required(path, text)?;

        let result = sqlx::query("INSERT INTO url (path, text_content) VALUES (?, ?)")
            .bind(path)
            .bind(text)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    async fn find_by_path(&self, path: &str) -> Result<Option<UrlRecord>, StoreError> {
        let row = sqlx::query(
            "SELECT id, path, text_content FROM url WHERE path = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(path)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| UrlRecord {
            id: row.get("id"),
            path: row.get("path"),
            text_content: row.get("text_content"),
        }))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_temp() -> (TempDir, SqliteStore) {
        let tmp = TempDir::new().unwrap();
        let config = DbConfig {
            path: tmp.path().join("nested").join("reader.sqlite"),
        };
        let store = SqliteStore::open(&config).await.unwrap();
        (tmp, store)
    }

    #[tokio::test]
    async fn insert_then_find() {
        let (_tmp, store) = open_temp().await;

        let id = store
            .insert("https://example.com/a", "Hello world")
            .await
            .unwrap();
        let record = store
            .find_by_path("https://example.com/a")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.text_content, "Hello world");
        store.close().await;
    }

    #[tokio::test]
    async fn duplicate_paths_accumulate_and_latest_wins() {
        let (_tmp, store) = open_temp().await;

        let first = store.insert("https://example.com", "old").await.unwrap();
        let second = store.insert("https://example.com", "new").await.unwrap();
        assert_ne!(first, second);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url WHERE path = ?")
            .bind("https://example.com")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count, 2);

        let record = store
            .find_by_path("https://example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.id, second);
        assert_eq!(record.text_content, "new");
    }

    #[tokio::test]
    async fn lookup_is_exact_match() {
        let (_tmp, store) = open_temp().await;
        store.insert("https://example.com/a", "text").await.unwrap();

        assert!(store
            .find_by_path("https://example.com/A")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_by_path("https://example.com/")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn empty_fields_are_rejected_before_writing() {
        let (_tmp, store) = open_temp().await;

        let err = store.insert("", "text").await.unwrap_err();
        assert!(matches!(err, StoreError::EmptyField("path")));
        let err = store.insert("https://example.com", "  \n").await.unwrap_err();
        assert!(matches!(err, StoreError::EmptyField("text_content")));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn quotes_in_values_are_stored_verbatim() {
        let (_tmp, store) = open_temp().await;
        let path = "https://example.com/?q=it's";
        let text = "Robert'); DROP TABLE url;--";

        store.insert(path, text).await.unwrap();
        let record = store.find_by_path(path).await.unwrap().unwrap();
        assert_eq!(record.text_content, text);
    }

    #[tokio::test]
    async fn reopening_keeps_schema_and_rows() {
        let tmp = TempDir::new().unwrap();
        let config = DbConfig {
            path: tmp.path().join("reader.sqlite"),
        };

        let store = SqliteStore::open(&config).await.unwrap();
        store.insert("https://example.com", "kept").await.unwrap();
        store.close().await;

        let store = SqliteStore::open(&config).await.unwrap();
        let record = store
            .find_by_path("https://example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.text_content, "kept");
    }
}
