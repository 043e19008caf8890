use anyhow::Result;
use sqlx::SqlitePool;

/// Creates the `url` table and its lookup index if they are absent.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS url (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            path TEXT NOT NULL,
            text_content TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_url_path ON url(path)")
        .execute(pool)
        .await?;

    Ok(())
}
