//! Outbound HTTP(S) page fetching.
//!
//! The URL is validated before any network activity; the body is read in
//! full before returning. No retry, and no timeout unless one is configured.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::FetchConfig;

/// Every variant carries the URL that was attempted.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Failed to fetch {url}: {reason}")]
    Transport { url: String, reason: String },
    #[error("Failed to fetch {url}: server responded with {status}")]
    Status { url: String, status: String },
    #[error("Failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url, .. }
            | FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. } => url,
        }
    }
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Parses `raw` as an absolute `http`/`https` URL with a host.
    pub fn validate(raw: &str) -> Result<Url, FetchError> {
        let invalid = |reason: String| FetchError::InvalidUrl {
            url: raw.to_string(),
            reason,
        };

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(format!("unsupported scheme '{}'", other))),
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }
        Ok(url)
    }

    /// Fetches `raw` and returns the full response body as text.
    pub async fn fetch(&self, raw: &str) -> Result<String, FetchError> {
        let url = Self::validate(raw)?;

        debug!(url = %url, "fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: raw.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: raw.to_string(),
                status: status.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Body {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        debug!(url = raw, bytes = body.len(), "fetched page");
        Ok(body)
    }
}
