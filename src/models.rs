//! Data types shared by the store, the pipeline and the HTTP layer.

use serde::{Deserialize, Serialize};

/// One persisted (URL, extracted text) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlRecord {
    pub id: i64,
    /// The URL as it was submitted (trimmed).
    pub path: String,
    pub text_content: String,
}

/// The `q` field of a submission, from the query string or a form body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmittedForm {
    #[serde(default)]
    pub q: Option<String>,
}

/// Query string of `GET /text-reader`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReaderQuery {
    #[serde(default)]
    pub path: Option<String>,
}
