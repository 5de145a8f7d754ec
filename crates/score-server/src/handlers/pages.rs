//! Documentation pages.
//!
//! Both the HTML pages and the pages API load the route's chunks through the
//! module loader, then read the navigation, metadata and content modules.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use md5::{Digest, Md5};
use score_content::{ContentNode, Document, TocEntry};
use score_loader::LoaderError;
use score_renderer::{PageContext, render_load_error, render_nodes};
use score_site::{NavLink, Route, Sidebar};
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Everything the modules of one route export.
struct LoadedPage {
    document: Document,
    toc: Vec<TocEntry>,
    nodes: Vec<ContentNode>,
    sidebar: Sidebar,
    previous: Option<NavLink>,
    next: Option<NavLink>,
}

impl LoadedPage {
    fn context(&self) -> PageContext<'_> {
        PageContext {
            document: &self.document,
            nodes: &self.nodes,
            toc: &self.toc,
            sidebar: &self.sidebar,
            previous: self.previous.as_ref(),
            next: self.next.as_ref(),
        }
    }
}

/// Load the navigation and route chunks and read their modules.
///
/// The entry module's first dependency is the document's metadata module.
async fn load_page(state: &AppState, route: &Route) -> Result<LoadedPage, ServerError> {
    let navigation = &state.manifest.navigation;
    let chunks: Vec<u32> = navigation
        .chunks
        .iter()
        .chain(&route.chunks)
        .copied()
        .collect();
    state.loader.ensure_chunks(&chunks).await?;

    let sidebar: Sidebar = state
        .loader
        .require_async(&navigation.module)
        .await?
        .decode("sidebar")?;
    let content = state.loader.require_async(&route.module).await?;

    let metadata_id = state
        .loader
        .modules()
        .dependencies(&route.module)
        .and_then(|deps| deps.into_iter().next())
        .ok_or_else(|| LoaderError::Export {
            key: route.module.clone(),
            message: "entry module has no metadata dependency".to_owned(),
        })?;
    let metadata = state.loader.require_async(&metadata_id).await?;

    Ok(LoadedPage {
        document: metadata.decode("document")?,
        toc: content.decode("toc")?,
        nodes: content.decode("nodes")?,
        sidebar,
        previous: metadata.decode("previous")?,
        next: metadata.decode("next")?,
    })
}

/// Render the HTML page for a permalink.
///
/// Chunk load failures produce a 503 page with a retry link back to `path`.
pub(crate) async fn render_page(state: &AppState, path: &str, route: &Route) -> Response {
    match load_page(state, route).await {
        Ok(page) => Html(state.renderer.render(page.context())).into_response(),
        Err(ServerError::ChunkLoad(err)) => {
            tracing::warn!(
                path,
                chunk_id = err.chunk_id,
                reason = %err.reason,
                "Page chunks failed to load"
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [(header::CACHE_CONTROL, "no-store")],
                Html(render_load_error(&err, path)),
            )
                .into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// Response for GET /api/pages/{permalink}.
#[derive(Serialize)]
struct PageResponse<'a> {
    /// Document metadata.
    meta: &'a Document,
    /// Table of contents entries.
    toc: &'a [TocEntry],
    /// Rendered HTML content.
    content: String,
    /// Previous document in reading order.
    previous: Option<&'a NavLink>,
    /// Next document in reading order.
    next: Option<&'a NavLink>,
}

/// Handle GET /api/pages/{permalink}.
pub(crate) async fn get_page(
    Path(permalink): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let permalink = format!("/{permalink}");
    let route = state
        .manifest
        .route(&permalink)
        .ok_or_else(|| ServerError::PageNotFound(permalink.clone()))?;
    let page = load_page(&state, route).await?;

    let response = PageResponse {
        meta: &page.document,
        toc: &page.toc,
        content: render_nodes(&page.nodes).html,
        previous: page.previous.as_ref(),
        next: page.next.as_ref(),
    };
    let body = serde_json::to_string(&response)?;
    let etag = compute_etag(&state.version, &body);

    if etag_matches(&headers, &etag) {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        body,
    )
        .into_response())
}

/// Compute `ETag` from version and content.
///
/// MD5 truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

/// Whether `If-None-Match` lists `etag` (or `*`).
fn etag_matches(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .split(',')
                .map(|tag| tag.trim().trim_start_matches("W/"))
                .any(|tag| tag == etag || tag == "*")
        })
}
