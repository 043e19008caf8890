//! Page rendering.
//!
//! Templates are plain HTML with `{{ name }}` placeholders. Built-in
//! templates are compiled into the binary; a configured template directory
//! replaces them file by file. Every substituted value is HTML-escaped.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::RenderConfig;

/// The three pages the server can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    TextReader,
    Error,
}

impl View {
    pub fn template_name(self) -> &'static str {
        match self {
            View::Home => "index.html",
            View::TextReader => "text-reader.html",
            View::Error => "error.html",
        }
    }

    fn builtin(self) -> &'static str {
        match self {
            View::Home => include_str!("../templates/index.html"),
            View::TextReader => include_str!("../templates/text-reader.html"),
            View::Error => include_str!("../templates/error.html"),
        }
    }
}

/// View-model handed to the renderer. Home takes none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderContext {
    Reader { url: String, content: String },
    Error { error_message: String },
}

impl RenderContext {
    fn value(&self, name: &str) -> Option<&str> {
        match (self, name) {
            (RenderContext::Reader { url, .. }, "url") => Some(url),
            (RenderContext::Reader { content, .. }, "content") => Some(content),
            (RenderContext::Error { error_message }, "error_message") => Some(error_message),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to load template {path}: {reason}")]
    Template { path: String, reason: String },
    #[error("template {template} needs '{field}' but the context does not provide it")]
    MissingField { template: &'static str, field: String },
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    templates_dir: Option<PathBuf>,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            templates_dir: config.templates_dir.clone(),
        }
    }

    /// Renders `view`, failing when its template cannot be loaded or
    /// references a field the context lacks.
    pub async fn render(
        &self,
        view: View,
        context: Option<&RenderContext>,
    ) -> Result<String, RenderError> {
        let template = match &self.templates_dir {
            Some(dir) => load_template(dir, view).await?,
            None => view.builtin().to_string(),
        };
        fill(&template, view.template_name(), context)
    }
}

async fn load_template(dir: &Path, view: View) -> Result<String, RenderError> {
    let path = dir.join(view.template_name());
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| RenderError::Template {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}

fn fill(
    template: &str,
    template_name: &'static str,
    context: Option<&RenderContext>,
) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        out.push_str(&rest[..start]);

        let field = rest[start + 2..start + 2 + len].trim();
        let value = context
            .and_then(|ctx| ctx.value(field))
            .ok_or_else(|| RenderError::MissingField {
                template: template_name,
                field: field.to_string(),
            })?;
        out.push_str(&escape_text(value));

        rest = &rest[start + 2 + len + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Escapes a value for an HTML text node. Whitespace passes through.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
