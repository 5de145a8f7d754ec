//! Chunk fetchers.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::{FetchError, FetchErrorKind};

/// A single chunk fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkRequest {
    /// Chunk being fetched.
    pub chunk_id: u32,
    /// Location from the chunk manifest.
    pub url: String,
}

/// Source of chunk file bytes.
#[async_trait]
pub trait ChunkFetcher: Send + Sync {
    /// Fetch the raw bytes of a chunk file.
    async fn fetch(&self, request: &ChunkRequest) -> Result<Vec<u8>, FetchError>;
}

/// Reads chunk files from the build output directory.
#[derive(Clone, Debug)]
pub struct FsChunkFetcher {
    root: PathBuf,
}

impl FsChunkFetcher {
    /// Create a fetcher rooted at the build output directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ChunkFetcher for FsChunkFetcher {
    async fn fetch(&self, request: &ChunkRequest) -> Result<Vec<u8>, FetchError> {
        let relative = request.url.trim_start_matches('/');
        if relative.split('/').any(|part| part == "..") {
            return Err(FetchError::new(
                FetchErrorKind::Missing,
                format!("refusing path outside output directory: {}", request.url),
            ));
        }

        let path = self.root.join(relative);
        tokio::fs::read(&path).await.map_err(|e| {
            let kind = if e.kind() == ErrorKind::NotFound {
                FetchErrorKind::Missing
            } else {
                FetchErrorKind::Network
            };
            FetchError::new(kind, format!("{}: {e}", path.display()))
        })
    }
}
