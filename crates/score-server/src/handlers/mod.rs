//! HTTP request handlers.

pub(crate) mod landing;
pub(crate) mod navigation;
pub(crate) mod pages;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use percent_encoding::percent_decode_str;
use score_renderer::render_not_found;

use crate::state::AppState;
use crate::static_files;

/// Documentation pages, then static files, then a 404 page.
///
/// Permalinks and file names are matched after percent-decoding.
pub(crate) async fn fallback(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let decoded = percent_decode_str(uri.path()).decode_utf8_lossy();
    let path = decoded.as_ref();

    if let Some(route) = state.manifest.route(path) {
        return pages::render_page(&state, path, route).await;
    }

    if let Some(response) = static_files::serve(&state, path).await {
        return response;
    }

    tracing::debug!(path, "No page or file for path");
    (
        StatusCode::NOT_FOUND,
        Html(render_not_found(path, &state.manifest.docs_root)),
    )
        .into_response()
}
