//! Content registry errors.

use std::path::PathBuf;

/// Error building the content registry.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Source directory is missing.
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),

    /// Reading a source file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Front matter could not be parsed.
    #[error("Invalid front matter: {0}")]
    FrontMatter(String),

    /// A source file failed to load.
    #[error("{path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: Box<ContentError>,
    },

    /// Two documents share an id.
    #[error("Duplicate document id '{id}' ({first} and {second})")]
    DuplicateId {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Two documents resolve to the same permalink.
    #[error("Duplicate permalink '{permalink}' ({first} and {second})")]
    DuplicatePermalink {
        permalink: String,
        first: PathBuf,
        second: PathBuf,
    },
}
