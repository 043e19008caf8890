//! HTML to plain text.
//!
//! Extraction never fails: a page without visible body text yields an empty
//! string, and the caller decides whether that is acceptable.

use scraper::{Html, Selector};

/// Elements whose text content is never rendered.
const INVISIBLE: &[&str] = &["script", "style", "noscript", "template"];

/// Returns the concatenated text of the document `<body>`, trimmed at both
/// ends. Text inside [`INVISIBLE`] elements is skipped.
pub fn extract_body_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let body_selector = match Selector::parse("body") {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    let body = match document.select(&body_selector).next() {
        Some(body) => body,
        None => return String::new(),
    };

    let mut out = String::new();
    for node in body.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| INVISIBLE.contains(&el.name()))
        });
        if !hidden {
            out.push_str(text);
        }
    }

    out.trim().to_string()
}

/// Returns the trimmed `<title>` text, if the page has a non-empty one.
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    let title: String = document.select(&selector).next()?.text().collect();
    let title = title.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}
