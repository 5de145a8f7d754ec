//! Loader error types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error resolving or executing a module.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// Module id is not registered.
    #[error("Cannot find module '{module_id}'")]
    ModuleNotFound { module_id: String },

    /// Module factory failed. The module stays registered and can be retried.
    #[error("Module '{module_id}' failed to initialize: {source}")]
    ModuleFactory {
        module_id: String,
        #[source]
        source: Box<LoaderError>,
    },

    /// Error raised by a factory itself.
    #[error("{0}")]
    Factory(String),

    /// Export is missing or has an unexpected shape.
    #[error("Invalid export '{key}': {message}")]
    Export { key: String, message: String },

    /// Chunk containing the module could not be loaded.
    #[error(transparent)]
    ChunkLoad(#[from] ChunkLoadError),
}

/// Why a chunk failed to load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkFailure {
    /// Transport or I/O failure.
    Network,
    /// Fetch did not settle within the loader timeout.
    Timeout,
    /// Chunk absent from the manifest or from the deployment.
    Missing,
    /// Payload could not be decoded or belongs to another chunk.
    Malformed,
    /// Loader shut down while the fetch was in flight.
    Cancelled,
}

impl ChunkFailure {
    /// Reason as a lowercase identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Missing => "missing",
            Self::Malformed => "malformed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ChunkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chunk fetch failure delivered to every waiter of that fetch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Loading chunk {chunk_id} failed.\n({reason}: {request})")]
pub struct ChunkLoadError {
    /// Chunk that failed.
    pub chunk_id: u32,
    /// Failure category.
    pub reason: ChunkFailure,
    /// Requested location.
    pub request: String,
    /// Underlying error message, for logs.
    pub detail: Option<String>,
}

impl ChunkLoadError {
    /// Create a chunk load error without detail.
    #[must_use]
    pub fn new(chunk_id: u32, reason: ChunkFailure, request: impl Into<String>) -> Self {
        Self {
            chunk_id,
            reason,
            request: request.into(),
            detail: None,
        }
    }

    /// Attach the underlying error message.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Error category reported by a [`ChunkFetcher`](crate::ChunkFetcher).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Transport or I/O failure.
    Network,
    /// Resource does not exist.
    Missing,
    /// Resource exists but is unusable.
    Malformed,
}

impl From<FetchErrorKind> for ChunkFailure {
    fn from(kind: FetchErrorKind) -> Self {
        match kind {
            FetchErrorKind::Network => Self::Network,
            FetchErrorKind::Missing => Self::Missing,
            FetchErrorKind::Malformed => Self::Malformed,
        }
    }
}

/// Error returned by a chunk fetcher.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    /// Semantic error category.
    pub kind: FetchErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl FetchError {
    /// Create a fetch error.
    #[must_use]
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_load_error_message() {
        let err = ChunkLoadError::new(3, ChunkFailure::Timeout, "chunks/4a1b2c3d.9e8f7a6b.json");

        assert_eq!(
            err.to_string(),
            "Loading chunk 3 failed.\n(timeout: chunks/4a1b2c3d.9e8f7a6b.json)"
        );
    }

    #[test]
    fn test_module_factory_error_chains_source() {
        let err = LoaderError::ModuleFactory {
            module_id: "doc:intro:content".to_owned(),
            source: Box::new(LoaderError::ModuleNotFound {
                module_id: "doc:intro:metadata".to_owned(),
            }),
        };

        assert_eq!(
            err.to_string(),
            "Module 'doc:intro:content' failed to initialize: Cannot find module 'doc:intro:metadata'"
        );
    }

    #[test]
    fn test_fetch_kind_maps_to_failure() {
        assert_eq!(ChunkFailure::from(FetchErrorKind::Missing), ChunkFailure::Missing);
        assert_eq!(ChunkFailure::from(FetchErrorKind::Network), ChunkFailure::Network);
    }
}
