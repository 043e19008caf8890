//! The submit pipeline: validate → fetch → extract → insert.
//!
//! All-or-nothing: nothing is stored unless the fetch succeeds and the page
//! has visible text. Each stage short-circuits with its own error.

use thiserror::Error;
use tracing::info;

use crate::extract::{extract_body_text, extract_title};
use crate::fetch::{FetchError, Fetcher};
use crate::render::RenderError;
use crate::store::{RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The detail is logged, never shown.
    #[error("Invalid URL submitted")]
    Validation { reason: String },
    #[error(transparent)]
    Fetch(FetchError),
    #[error("Parsing the body of the fetched document yielded no text content: {url}")]
    Extraction { url: String },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl PipelineError {
    /// Whether the message may be shown to the user. Internal failures are
    /// reported generically.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            PipelineError::Validation { .. }
                | PipelineError::Fetch(_)
                | PipelineError::Extraction { .. }
        )
    }
}

impl From<FetchError> for PipelineError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidUrl { .. } => PipelineError::Validation {
                reason: err.to_string(),
            },
            other => PipelineError::Fetch(other),
        }
    }
}

/// A page that made it through the whole pipeline.
#[derive(Debug, Clone)]
pub struct Submitted {
    pub id: i64,
    pub path: String,
    pub chars: usize,
}

/// Trims and validates a raw `q` value, returning the URL string that will
/// be fetched, stored and looked up.
pub fn validate_submission(q: Option<&str>) -> Result<String, PipelineError> {
    let q = q.map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Err(PipelineError::Validation {
            reason: "q is missing or empty".to_string(),
        });
    }
    Fetcher::validate(q)?;
    Ok(q.to_string())
}

/// A fetched page with visible text.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub title: Option<String>,
    pub text: String,
}

/// Fetches the page and extracts its title and visible text, rejecting
/// pages without text.
pub async fn fetch_page(fetcher: &Fetcher, url: &str) -> Result<FetchedPage, PipelineError> {
    let html = fetcher.fetch(url).await?;
    let text = extract_body_text(&html);
    if text.is_empty() {
        return Err(PipelineError::Extraction {
            url: url.to_string(),
        });
    }
    Ok(FetchedPage {
        title: extract_title(&html),
        text,
    })
}

/// Fetches the page and returns only its visible text.
pub async fn fetch_text(fetcher: &Fetcher, url: &str) -> Result<String, PipelineError> {
    Ok(fetch_page(fetcher, url).await?.text)
}

/// Runs the full pipeline for a submitted `q` value.
pub async fn submit(
    fetcher: &Fetcher,
    store: &dyn RecordStore,
    q: Option<&str>,
) -> Result<Submitted, PipelineError> {
    let path = validate_submission(q)?;
    let text = fetch_text(fetcher, &path).await?;
    let id = store.insert(&path, &text).await?;

    info!(id, url = %path, chars = text.chars().count(), "stored page text");

    Ok(Submitted {
        id,
        chars: text.chars().count(),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use crate::store::InMemoryStore;

    #[test]
    fn blank_or_missing_q_is_invalid() {
        for q in [None, Some(""), Some("   ")] {
            let err = validate_submission(q).unwrap_err();
            assert!(matches!(
                err,
                PipelineError::Validation { ref reason } if reason.contains("missing")
            ));
        }
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let url = validate_submission(Some("  https://example.com/a \n")).unwrap();
        assert_eq!(url, "https://example.com/a");
    }

    #[test]
    fn unparseable_url_is_a_validation_error() {
        let err = validate_submission(Some("not-a-link")).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Validation { ref reason } if reason.contains("not-a-link")
        ));
        assert!(err.is_user_facing());
        assert_eq!(err.to_string(), "Invalid URL submitted");
    }

    #[tokio::test]
    async fn invalid_submission_stores_nothing() {
        let fetcher = Fetcher::new(&FetchConfig::default()).unwrap();
        let store = InMemoryStore::new();

        let err = submit(&fetcher, &store, Some("not-a-link"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Validation { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn internal_errors_are_not_user_facing() {
        let err = PipelineError::from(StoreError::EmptyField("path"));
        assert!(!err.is_user_facing());
    }
}
