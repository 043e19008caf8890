//! Fetch and extract a page without storing it (`readaloud extract`).

use anyhow::{anyhow, Result};

use crate::config::Config;
use crate::fetch::Fetcher;
use crate::pipeline::{fetch_page, validate_submission, PipelineError};

pub async fn run_extract(config: &Config, url: &str) -> Result<()> {
    let url = validate_submission(Some(url)).map_err(|e| match e {
        PipelineError::Validation { reason } => anyhow!("Invalid URL submitted: {}", reason),
        other => other.into(),
    })?;
    let fetcher = Fetcher::new(&config.fetch)?;
    let page = fetch_page(&fetcher, &url).await?;

    println!("title: {}", page.title.as_deref().unwrap_or("(untitled)"));
    println!("url:   {}", url);
    println!("chars: {}", page.text.chars().count());
    println!();
    println!("{}", page.text);

    Ok(())
}
