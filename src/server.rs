//! HTTP server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/`, `/index.html` | Home page with the URL form |
//! | `GET`, `POST` | `/submit-url?q=<url>` | Fetch, extract and store `q`, then redirect to the reader. `POST` also accepts `q` in a form body |
//! | `GET`  | `/text-reader?path=<url>` | Stored text for a URL |
//! | `GET`  | `/app.js` | Client speech script |
//!
//! # Error Contract
//!
//! | Status | Body | When |
//! |--------|------|------|
//! | 400 | home page | `q` missing or not an absolute http(s) URL |
//! | 400 | error page with message | fetch failed or the page had no visible text |
//! | 400 | `Bad Request` | `/text-reader` without `path` |
//! | 404 | `Not Found` | unknown path, or no stored text for `path` |
//! | 405 | `Method Not Allowed` | known path, unsupported method |
//! | 500 | `Internal Server Error` | store or template failure (details are only logged) |

use anyhow::Context;
use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use std::fmt::Display;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::fetch::Fetcher;
use crate::models::{ReaderQuery, SubmittedForm};
use crate::pipeline::{self, PipelineError};
use crate::render::{RenderContext, Renderer, View};
use crate::store::{RecordStore, SqliteStore};

/// Browser script served at `/app.js`.
pub const CLIENT_SCRIPT: &str = include_str!("../assets/app.js");

/// Collaborators shared by every handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub fetcher: Arc<Fetcher>,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, fetcher: Fetcher, renderer: Renderer) -> Self {
        Self {
            store,
            fetcher: Arc::new(fetcher),
            renderer: Arc::new(renderer),
        }
    }
}

/// Builds the route table around `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_home).fallback(handle_method_not_allowed))
        .route(
            "/index.html",
            get(handle_home).fallback(handle_method_not_allowed),
        )
        .route(
            "/submit-url",
            get(handle_submit_query)
                .post(handle_submit_form)
                .fallback(handle_method_not_allowed),
        )
        .route(
            "/text-reader",
            get(handle_text_reader).fallback(handle_method_not_allowed),
        )
        .route(
            "/app.js",
            get(handle_client_script).fallback(handle_method_not_allowed),
        )
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Opens the store, binds `[server]` and serves until Ctrl-C, then closes
/// the store.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let store = Arc::new(SqliteStore::open(&config.db).await?);
    let state = AppState::new(
        store.clone(),
        Fetcher::new(&config.fetch)?,
        Renderer::new(&config.render),
    );

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, db = %config.db.path.display(), "server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down");
    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

// ============ Responses ============

fn internal_error(err: impl Display) -> Response {
    error!(error = %err, "internal error");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

async fn render_page(
    state: &AppState,
    status: StatusCode,
    view: View,
    context: Option<&RenderContext>,
) -> Response {
    match state.renderer.render(view, context).await {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => internal_error(e),
    }
}

async fn pipeline_error(state: &AppState, err: PipelineError) -> Response {
    match &err {
        PipelineError::Validation { reason } => {
            warn!(%reason, "rejected submission");
            render_page(state, StatusCode::BAD_REQUEST, View::Home, None).await
        }
        PipelineError::Fetch(_) | PipelineError::Extraction { .. } => {
            warn!(error = %err, "submission failed");
            let context = RenderContext::Error {
                error_message: err.to_string(),
            };
            render_page(state, StatusCode::BAD_REQUEST, View::Error, Some(&context)).await
        }
        PipelineError::Store(_) | PipelineError::Render(_) => internal_error(&err),
    }
}

/// `Location` of the reader page for a stored URL.
pub fn reader_location(path: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("path", path)
        .finish();
    format!("/text-reader?{}", query)
}

// ============ GET / ============

async fn handle_home(State(state): State<AppState>) -> Response {
    render_page(&state, StatusCode::OK, View::Home, None).await
}

// ============ GET|POST /submit-url ============

async fn handle_submit_query(
    State(state): State<AppState>,
    Query(form): Query<SubmittedForm>,
) -> Response {
    submit(&state, form).await
}

/// `q` comes from the query string when present, otherwise from a
/// form-encoded body. A body that is missing or not a form counts as no `q`.
async fn handle_submit_form(
    State(state): State<AppState>,
    Query(query): Query<SubmittedForm>,
    body: Result<Form<SubmittedForm>, FormRejection>,
) -> Response {
    let has_query_q = query.q.as_deref().is_some_and(|q| !q.trim().is_empty());
    let form = if has_query_q {
        query
    } else {
        match body {
            Ok(Form(form)) => form,
            Err(rejection) => {
                debug!(%rejection, "submission without a form body");
                SubmittedForm::default()
            }
        }
    };
    submit(&state, form).await
}

async fn submit(state: &AppState, form: SubmittedForm) -> Response {
    match pipeline::submit(&state.fetcher, state.store.as_ref(), form.q.as_deref()).await {
        Ok(submitted) => (
            StatusCode::FOUND,
            [(header::LOCATION, reader_location(&submitted.path))],
        )
            .into_response(),
        Err(err) => pipeline_error(state, err).await,
    }
}

// ============ GET /text-reader ============

async fn handle_text_reader(
    State(state): State<AppState>,
    Query(query): Query<ReaderQuery>,
) -> Response {
    let path = match query.path.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => p,
        _ => return (StatusCode::BAD_REQUEST, "Bad Request").into_response(),
    };

    let record = match state.store.find_by_path(path).await {
        Ok(Some(record)) => record,
        Ok(None) => return handle_not_found().await.into_response(),
        Err(e) => return internal_error(e),
    };

    let context = RenderContext::Reader {
        url: record.path,
        content: record.text_content,
    };
    render_page(&state, StatusCode::OK, View::TextReader, Some(&context)).await
}

// ============ GET /app.js ============

async fn handle_client_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        CLIENT_SCRIPT,
    )
}

// ============ Fallbacks ============

async fn handle_not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

async fn handle_method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
