use std::path::PathBuf;

/// Error emitting or reading a site bundle.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// Filesystem error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Manifest was written by an incompatible build.
    #[error("Unsupported manifest version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// More documents than chunk ids.
    #[error("Too many documents for chunk ids: {0}")]
    TooManyDocuments(usize),
}
