//! In-memory chunk fetcher for testing.
//!
//! Provides [`MemoryChunkFetcher`] for exercising the loader without touching
//! the filesystem.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::{ChunkFetcher, ChunkPayload, ChunkRequest, FetchError, FetchErrorKind};

#[derive(Clone, Debug)]
enum MemoryChunk {
    Bytes(Vec<u8>),
    Failure(FetchError),
    /// Never settles.
    Hang,
}

/// Chunk fetcher serving configured responses from memory.
///
/// Counts fetches per URL so tests can assert request de-duplication.
///
/// # Example
///
/// ```ignore
/// use score_loader::{ChunkPayload, MemoryChunkFetcher};
///
/// let fetcher = MemoryChunkFetcher::new()
///     .with_payload("chunks/1.json", &ChunkPayload::new(1))
///     .with_hanging("chunks/2.json");
/// ```
#[derive(Debug, Default)]
pub struct MemoryChunkFetcher {
    chunks: RwLock<HashMap<String, MemoryChunk>>,
    fetches: RwLock<HashMap<String, usize>>,
    delay: Option<Duration>,
}

impl MemoryChunkFetcher {
    /// Create a fetcher with no chunks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve raw bytes for a URL.
    #[must_use]
    pub fn with_bytes(self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.set_bytes(url, bytes);
        self
    }

    /// Serve a chunk payload for a URL.
    ///
    /// # Panics
    ///
    /// Panics if the payload cannot be serialized.
    #[must_use]
    pub fn with_payload(self, url: impl Into<String>, payload: &ChunkPayload) -> Self {
        let bytes = payload.to_bytes().expect("chunk payload serializes");
        self.with_bytes(url, bytes)
    }

    /// Fail fetches of a URL.
    #[must_use]
    pub fn with_failure(self, url: impl Into<String>, kind: FetchErrorKind) -> Self {
        self.set_failure(url, kind);
        self
    }

    /// Never settle fetches of a URL.
    #[must_use]
    pub fn with_hanging(self, url: impl Into<String>) -> Self {
        self.chunks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.into(), MemoryChunk::Hang);
        self
    }

    /// Delay every fetch.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace the response for a URL.
    pub fn set_bytes(&self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.chunks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.into(), MemoryChunk::Bytes(bytes.into()));
    }

    /// Replace the response for a URL with a failure.
    pub fn set_failure(&self, url: impl Into<String>, kind: FetchErrorKind) {
        let url = url.into();
        let error = FetchError::new(kind, format!("injected failure for {url}"));
        self.chunks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url, MemoryChunk::Failure(error));
    }

    /// Number of fetches issued for a URL.
    #[must_use]
    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    /// Number of fetches issued for all URLs.
    #[must_use]
    pub fn total_fetches(&self) -> usize {
        self.fetches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .sum()
    }
}

#[async_trait]
impl ChunkFetcher for MemoryChunkFetcher {
    async fn fetch(&self, request: &ChunkRequest) -> Result<Vec<u8>, FetchError> {
        *self
            .fetches
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(request.url.clone())
            .or_default() += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let chunk = self
            .chunks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&request.url)
            .cloned();

        match chunk {
            Some(MemoryChunk::Bytes(bytes)) => Ok(bytes),
            Some(MemoryChunk::Failure(error)) => Err(error),
            Some(MemoryChunk::Hang) => std::future::pending().await,
            None => Err(FetchError::new(
                FetchErrorKind::Missing,
                format!("no chunk at {}", request.url),
            )),
        }
    }
}
