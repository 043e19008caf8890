//! Stored record lookup for the `readaloud get` command.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::models::UrlRecord;
use crate::store::{RecordStore, SqliteStore};

/// Returns the most recent record stored for `path`.
pub async fn get_record(config: &Config, path: &str) -> Result<UrlRecord> {
    let store = SqliteStore::open(&config.db).await?;
    let record = store.find_by_path(path.trim()).await;
    store.close().await;

    match record? {
        Some(record) => Ok(record),
        None => bail!("no stored text for: {}", path),
    }
}

/// CLI entry point — prints the record as text or JSON.
pub async fn run_get(config: &Config, path: &str, json: bool) -> Result<()> {
    let record = get_record(config, path).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("--- Record ---");
    println!("id:    {}", record.id);
    println!("path:  {}", record.path);
    println!("chars: {}", record.text_content.chars().count());
    println!();
    println!("--- Text ---");
    println!("{}", record.text_content);

    Ok(())
}
