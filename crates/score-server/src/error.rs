//! Server error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use score_loader::{ChunkLoadError, LoaderError};
use score_site::BundleError;
use serde_json::json;

/// Server error.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No route for the requested permalink.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// A chunk the page needs could not be loaded.
    #[error(transparent)]
    ChunkLoad(#[from] ChunkLoadError),

    /// A module failed to resolve or its exports did not decode.
    #[error(transparent)]
    Loader(LoaderError),

    /// Build output could not be read.
    #[error(transparent)]
    Bundle(#[from] BundleError),

    /// Listen address is invalid.
    #[error("Invalid listen address {address}: {message}")]
    Address { address: String, message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Response body could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<LoaderError> for ServerError {
    fn from(err: LoaderError) -> Self {
        match err {
            LoaderError::ChunkLoad(chunk) => Self::ChunkLoad(chunk),
            other => Self::Loader(other),
        }
    }
}

impl ServerError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::PageNotFound(_) => StatusCode::NOT_FOUND,
            Self::ChunkLoad(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Loader(_)
            | Self::Bundle(_)
            | Self::Address { .. }
            | Self::Io(_)
            | Self::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::PageNotFound(path) => json!({"error": "Page not found", "path": path}),
            Self::ChunkLoad(err) => json!({
                "error": "Chunk load failed",
                "chunkId": err.chunk_id,
                "reason": err.reason,
                "request": err.request,
            }),
            other => json!({"error": other.to_string()}),
        };

        if status.is_server_error() {
            tracing::warn!(error = %self, status = status.as_u16(), "Request failed");
        }
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use score_loader::ChunkFailure;

    use super::*;

    #[test]
    fn test_loader_chunk_error_maps_to_unavailable() {
        let err: ServerError =
            LoaderError::from(ChunkLoadError::new(2, ChunkFailure::Network, "chunks/a.json")).into();

        assert!(matches!(err, ServerError::ChunkLoad(_)));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_module_not_found_is_internal() {
        let err: ServerError = LoaderError::ModuleNotFound {
            module_id: "doc:intro:content".to_owned(),
        }
        .into();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_page_not_found_status() {
        let err = ServerError::PageNotFound("/docs/missing".to_owned());

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
