//! Module loader: chunk state machine on top of the module table.
//!
//! # Chunk lifecycle
//!
//! ```text
//! unrequested ──ensure──▶ pending ──ok──▶ loaded
//!                          │  ▲
//!                       err│  │ensure (fresh attempt)
//!                          ▼  │
//!                         failed
//! ```
//!
//! Each fetch runs in its own task under `tokio::time::timeout`. Its outcome is
//! published on a `watch` channel that every waiter of that chunk subscribes
//! to, so concurrent callers share a single fetch and observe the same result.
//! The chunk table lock is only held for state transitions, never across an
//! `.await`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::{
    ChunkFailure, ChunkFetcher, ChunkLoadError, ChunkManifest, ChunkPayload, ChunkRequest,
    Exports, LoaderError, ModuleDefinition, ModuleTable,
};

/// Default time a chunk fetch may take before failing with `timeout`.
pub const DEFAULT_CHUNK_TIMEOUT: Duration = Duration::from_secs(120);

/// Loader tuning.
#[derive(Clone, Debug)]
pub struct LoaderOptions {
    /// Per-fetch timeout.
    pub chunk_timeout: Duration,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            chunk_timeout: DEFAULT_CHUNK_TIMEOUT,
        }
    }
}

impl LoaderOptions {
    /// Set the per-fetch timeout.
    #[must_use]
    pub fn with_chunk_timeout(mut self, timeout: Duration) -> Self {
        self.chunk_timeout = timeout;
        self
    }
}

/// Observable load state of a chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChunkStatus {
    /// Never requested.
    Unrequested,
    /// Fetch in flight.
    Pending,
    /// Modules installed.
    Loaded,
    /// Last attempt failed.
    Failed(ChunkLoadError),
}

type Outcome = Option<Result<(), ChunkLoadError>>;

enum ChunkEntry {
    Pending {
        outcome: watch::Receiver<Outcome>,
        request: String,
        task: AbortHandle,
    },
    Loaded,
    Failed(ChunkLoadError),
}

enum Attempt {
    Loaded,
    Wait {
        outcome: watch::Receiver<Outcome>,
        request: String,
    },
    Failed(ChunkLoadError),
}

struct LoaderInner {
    modules: ModuleTable,
    chunks: Mutex<HashMap<u32, ChunkEntry>>,
    manifest: ChunkManifest,
    fetcher: Arc<dyn ChunkFetcher>,
    options: LoaderOptions,
    shut_down: AtomicBool,
}

/// Handle to a module loader. Clones share the same module and chunk tables.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use score_loader::{ChunkManifest, FsChunkFetcher, ModuleLoader};
///
/// let manifest = ChunkManifest::new().with_chunk(1, "chunks/5d41402a.9b2a1c3e.json");
/// let loader = ModuleLoader::new(manifest, Arc::new(FsChunkFetcher::new("build")));
///
/// loader.ensure_chunk(1).await?;
/// let sidebar = loader.require("nav:sidebar")?;
/// ```
#[derive(Clone)]
pub struct ModuleLoader {
    inner: Arc<LoaderInner>,
}

impl ModuleLoader {
    /// Create a loader with default options.
    #[must_use]
    pub fn new(manifest: ChunkManifest, fetcher: Arc<dyn ChunkFetcher>) -> Self {
        Self::with_options(manifest, fetcher, LoaderOptions::default())
    }

    /// Create a loader.
    #[must_use]
    pub fn with_options(
        manifest: ChunkManifest,
        fetcher: Arc<dyn ChunkFetcher>,
        options: LoaderOptions,
    ) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                modules: ModuleTable::new(),
                chunks: Mutex::new(HashMap::new()),
                manifest,
                fetcher,
                options,
                shut_down: AtomicBool::new(false),
            }),
        }
    }

    /// Chunk manifest the loader resolves ids against.
    #[must_use]
    pub fn manifest(&self) -> &ChunkManifest {
        &self.inner.manifest
    }

    /// Underlying module table.
    #[must_use]
    pub fn modules(&self) -> &ModuleTable {
        &self.inner.modules
    }

    /// Register a module. The first definition of an id wins.
    pub fn define(&self, module_id: impl Into<String>, definition: ModuleDefinition) -> bool {
        self.inner.modules.define(module_id, definition)
    }

    /// Resolve a module's exports. See [`ModuleTable::require`].
    ///
    /// Blocks while another thread executes the module.
    pub fn require(&self, module_id: &str) -> Result<Arc<Exports>, LoaderError> {
        self.inner.modules.require(module_id)
    }

    /// Resolve a module's exports from async code.
    ///
    /// Runs [`ModuleLoader::require`] on the blocking pool so waiting for a
    /// factory never parks a runtime worker.
    pub async fn require_async(&self, module_id: &str) -> Result<Arc<Exports>, LoaderError> {
        let loader = self.clone();
        let id = module_id.to_owned();
        tokio::task::spawn_blocking(move || loader.require(&id))
            .await
            .map_err(|e| LoaderError::Factory(format!("module '{module_id}' task failed: {e}")))?
    }

    /// Current state of a chunk.
    #[must_use]
    pub fn chunk_state(&self, chunk_id: u32) -> ChunkStatus {
        match self.lock_chunks().get(&chunk_id) {
            None => ChunkStatus::Unrequested,
            Some(ChunkEntry::Pending { .. }) => ChunkStatus::Pending,
            Some(ChunkEntry::Loaded) => ChunkStatus::Loaded,
            Some(ChunkEntry::Failed(error)) => ChunkStatus::Failed(error.clone()),
        }
    }

    /// Make sure a chunk's modules are installed.
    ///
    /// Joins the in-flight fetch if there is one, otherwise starts a new
    /// attempt. Failures are not retried automatically.
    pub async fn ensure_chunk(&self, chunk_id: u32) -> Result<(), ChunkLoadError> {
        let attempt = self.begin(chunk_id);
        settle(chunk_id, attempt).await
    }

    /// Make sure several chunks are installed.
    ///
    /// All fetches start before any is awaited. Returns the first error in
    /// argument order.
    pub async fn ensure_chunks(&self, chunk_ids: &[u32]) -> Result<(), ChunkLoadError> {
        let attempts: Vec<_> = chunk_ids
            .iter()
            .map(|&chunk_id| (chunk_id, self.begin(chunk_id)))
            .collect();

        let mut first_error = None;
        for (chunk_id, attempt) in attempts {
            if let Err(e) = settle(chunk_id, attempt).await {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Abort in-flight fetches. Their waiters fail with `cancelled`, as does
    /// every later attempt to load a chunk.
    pub fn shutdown(&self) {
        self.inner.shut_down.store(true, Ordering::SeqCst);

        let mut chunks = self.lock_chunks();
        let mut cancelled = 0usize;
        for (&chunk_id, entry) in chunks.iter_mut() {
            if let ChunkEntry::Pending { request, task, .. } = entry {
                let error = ChunkLoadError::new(chunk_id, ChunkFailure::Cancelled, request.clone());
                task.abort();
                *entry = ChunkEntry::Failed(error);
                cancelled += 1;
            }
        }
        tracing::debug!(cancelled, "Module loader shut down");
    }

    fn lock_chunks(&self) -> MutexGuard<'_, HashMap<u32, ChunkEntry>> {
        self.inner
            .chunks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Transition a chunk towards `loaded`, spawning a fetch if needed.
    fn begin(&self, chunk_id: u32) -> Attempt {
        let mut chunks = self.lock_chunks();

        match chunks.get(&chunk_id) {
            Some(ChunkEntry::Loaded) => return Attempt::Loaded,
            // A closed channel without a value means the fetch task died; start over
            Some(ChunkEntry::Pending {
                outcome, request, ..
            }) if outcome.has_changed().is_ok() => {
                return Attempt::Wait {
                    outcome: outcome.clone(),
                    request: request.clone(),
                };
            }
            _ => {}
        }

        if self.inner.shut_down.load(Ordering::SeqCst) {
            return Attempt::Failed(ChunkLoadError::new(
                chunk_id,
                ChunkFailure::Cancelled,
                self.inner.manifest.file(chunk_id).unwrap_or_default(),
            ));
        }

        let Some(file) = self.inner.manifest.file(chunk_id) else {
            let error = ChunkLoadError::new(chunk_id, ChunkFailure::Missing, format!("chunk {chunk_id}"))
                .with_detail("not listed in the chunk manifest");
            tracing::warn!(chunk_id, "Chunk not found in manifest");
            chunks.insert(chunk_id, ChunkEntry::Failed(error.clone()));
            return Attempt::Failed(error);
        };

        let request = ChunkRequest {
            chunk_id,
            url: file.to_owned(),
        };
        let url = request.url.clone();
        let (sender, outcome) = watch::channel(None);
        let task = tokio::spawn(self.clone().fetch(request, sender));

        chunks.insert(
            chunk_id,
            ChunkEntry::Pending {
                outcome: outcome.clone(),
                request: url.clone(),
                task: task.abort_handle(),
            },
        );
        Attempt::Wait {
            outcome,
            request: url,
        }
    }

    async fn fetch(self, request: ChunkRequest, sender: watch::Sender<Outcome>) {
        let chunk_id = request.chunk_id;
        let timeout = self.inner.options.chunk_timeout;
        tracing::debug!(chunk_id, url = %request.url, "Fetching chunk");

        let result =
            match tokio::time::timeout(timeout, self.inner.fetcher.fetch(&request)).await {
                Err(_) => Err(
                    ChunkLoadError::new(chunk_id, ChunkFailure::Timeout, &request.url)
                        .with_detail(format!("no response within {}s", timeout.as_secs())),
                ),
                Ok(Err(e)) => Err(ChunkLoadError::new(chunk_id, e.kind.into(), &request.url)
                    .with_detail(e.message)),
                Ok(Ok(bytes)) => self.install(&request, &bytes),
            };

        let entry = match &result {
            Ok(()) => ChunkEntry::Loaded,
            Err(e) => ChunkEntry::Failed(e.clone()),
        };
        self.lock_chunks().insert(chunk_id, entry);

        match &result {
            Ok(()) => tracing::debug!(chunk_id, "Chunk loaded"),
            Err(e) => tracing::warn!(
                chunk_id,
                reason = %e.reason,
                url = %e.request,
                detail = e.detail.as_deref().unwrap_or_default(),
                "Chunk load failed"
            ),
        }

        sender.send_replace(Some(result));
    }

    /// Decode a chunk file and register its modules.
    fn install(&self, request: &ChunkRequest, bytes: &[u8]) -> Result<(), ChunkLoadError> {
        let malformed = |detail: String| {
            ChunkLoadError::new(request.chunk_id, ChunkFailure::Malformed, &request.url)
                .with_detail(detail)
        };

        let payload: ChunkPayload =
            serde_json::from_slice(bytes).map_err(|e| malformed(e.to_string()))?;
        if payload.chunk != request.chunk_id {
            return Err(malformed(format!("file contains chunk {}", payload.chunk)));
        }

        let count = payload.modules.len();
        for (module_id, module) in payload.modules {
            self.inner
                .modules
                .define(module_id, ModuleDefinition::data(module.deps, module.exports));
        }
        tracing::trace!(chunk_id = request.chunk_id, modules = count, "Installed chunk");
        Ok(())
    }
}

impl std::fmt::Debug for ModuleLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleLoader")
            .field("modules", &self.inner.modules)
            .field("chunks", &self.inner.manifest.len())
            .field("options", &self.inner.options)
            .finish_non_exhaustive()
    }
}

async fn settle(chunk_id: u32, attempt: Attempt) -> Result<(), ChunkLoadError> {
    match attempt {
        Attempt::Loaded => Ok(()),
        Attempt::Failed(error) => Err(error),
        Attempt::Wait {
            mut outcome,
            request,
        } => loop {
            let current = outcome.borrow_and_update().clone();
            if let Some(result) = current {
                return result;
            }
            if outcome.changed().await.is_err() {
                // Sender dropped: the fetch task was aborted
                let last = outcome.borrow().clone();
                return last.unwrap_or_else(|| {
                    Err(ChunkLoadError::new(chunk_id, ChunkFailure::Cancelled, request))
                });
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use serde_json::{Map, json};

    use super::*;
    use crate::{FetchErrorKind, MemoryChunkFetcher};

    const NAV_FILE: &str = "chunks/1b2c3d4e.5f6a7b8c.json";
    const DOC_FILE: &str = "chunks/9a8b7c6d.1e2f3a4b.json";

    fn manifest() -> ChunkManifest {
        ChunkManifest::new()
            .with_chunk(1, NAV_FILE)
            .with_chunk(2, DOC_FILE)
    }

    fn nav_payload() -> ChunkPayload {
        let mut exports = Map::new();
        exports.insert("sidebar".to_owned(), json!([]));
        ChunkPayload::new(1).with_module("nav:sidebar", Vec::new(), exports)
    }

    fn doc_payload() -> ChunkPayload {
        let mut metadata = Map::new();
        metadata.insert("title".to_owned(), json!("Introduction"));
        let mut content = Map::new();
        content.insert("nodes".to_owned(), json!([]));
        ChunkPayload::new(2)
            .with_module("doc:intro:metadata", Vec::new(), metadata)
            .with_module(
                "doc:intro:content",
                vec!["doc:intro:metadata".to_owned()],
                content,
            )
    }

    #[tokio::test]
    async fn test_require_async_waits_off_the_runtime() {
        use std::sync::mpsc;

        let loader = ModuleLoader::new(
            ChunkManifest::new(),
            Arc::new(MemoryChunkFetcher::new()) as Arc<dyn ChunkFetcher>,
        );
        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let started_tx = Mutex::new(started_tx);
        let release_rx = Mutex::new(release_rx);
        loader.define(
            "slow",
            ModuleDefinition::new(Vec::new(), move |_, exports| {
                let _ = started_tx.lock().unwrap().send(());
                let _ = release_rx.lock().unwrap().recv();
                exports.set("done", json!(true));
                Ok(())
            }),
        );

        let executing = {
            let loader = loader.clone();
            std::thread::spawn(move || loader.require("slow").unwrap())
        };
        started_rx.recv().unwrap();

        let waiter = {
            let loader = loader.clone();
            tokio::spawn(async move { loader.require_async("slow").await.unwrap() })
        };
        // The single runtime thread keeps running while the waiter is parked.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        release_tx.send(()).unwrap();
        let owner = executing.join().unwrap();
        let waited = waiter.await.unwrap();
        assert!(Arc::ptr_eq(&owner, &waited));
        assert_eq!(waited.get("done"), Some(json!(true)));
    }

    fn loader_with(fetcher: &Arc<MemoryChunkFetcher>) -> ModuleLoader {
        ModuleLoader::new(manifest(), Arc::clone(fetcher) as Arc<dyn ChunkFetcher>)
    }

    #[tokio::test]
    async fn test_ensure_chunk_installs_modules() {
        let fetcher = Arc::new(MemoryChunkFetcher::new().with_payload(DOC_FILE, &doc_payload()));
        let loader = loader_with(&fetcher);
        assert_eq!(loader.chunk_state(2), ChunkStatus::Unrequested);

        loader.ensure_chunk(2).await.unwrap();

        assert_eq!(loader.chunk_state(2), ChunkStatus::Loaded);
        let content = loader.require("doc:intro:content").unwrap();
        assert_eq!(content.get("nodes"), Some(json!([])));
        assert!(loader.modules().is_ready("doc:intro:metadata"));
    }

    #[tokio::test]
    async fn test_loaded_chunk_resolves_without_fetch() {
        let fetcher = Arc::new(MemoryChunkFetcher::new().with_payload(NAV_FILE, &nav_payload()));
        let loader = loader_with(&fetcher);

        loader.ensure_chunk(1).await.unwrap();
        loader.ensure_chunk(1).await.unwrap();

        assert_eq!(fetcher.fetch_count(NAV_FILE), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_ensure_chunk_fetches_once() {
        let fetcher = Arc::new(
            MemoryChunkFetcher::new()
                .with_payload(NAV_FILE, &nav_payload())
                .with_delay(Duration::from_millis(50)),
        );
        let loader = loader_with(&fetcher);
        let other = loader.clone();

        let (first, second) = tokio::join!(loader.ensure_chunk(1), other.ensure_chunk(1));

        assert_eq!(first, Ok(()));
        assert_eq!(second, Ok(()));
        assert_eq!(fetcher.fetch_count(NAV_FILE), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_rejects_every_waiter() {
        let fetcher = Arc::new(
            MemoryChunkFetcher::new()
                .with_failure(DOC_FILE, FetchErrorKind::Network)
                .with_delay(Duration::from_millis(10)),
        );
        let loader = loader_with(&fetcher);

        let (first, second) = tokio::join!(loader.ensure_chunk(2), loader.ensure_chunk(2));

        let first = first.unwrap_err();
        assert_eq!(first.reason, ChunkFailure::Network);
        assert_eq!(second.unwrap_err(), first);
        assert_eq!(fetcher.fetch_count(DOC_FILE), 1);
        assert_eq!(loader.chunk_state(2), ChunkStatus::Failed(first));
    }

    #[tokio::test]
    async fn test_failed_chunk_retried_by_fresh_call() {
        let fetcher =
            Arc::new(MemoryChunkFetcher::new().with_failure(NAV_FILE, FetchErrorKind::Network));
        let loader = loader_with(&fetcher);

        assert!(loader.ensure_chunk(1).await.is_err());
        fetcher.set_bytes(NAV_FILE, nav_payload().to_bytes().unwrap());
        loader.ensure_chunk(1).await.unwrap();

        assert_eq!(fetcher.fetch_count(NAV_FILE), 2);
        assert_eq!(loader.chunk_state(1), ChunkStatus::Loaded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_fails_chunk_and_next_call_fetches_again() {
        let fetcher = Arc::new(MemoryChunkFetcher::new().with_hanging(DOC_FILE));
        let loader = loader_with(&fetcher);
        let started = tokio::time::Instant::now();

        let err = loader.ensure_chunk(2).await.unwrap_err();

        assert_eq!(err.reason, ChunkFailure::Timeout);
        assert_eq!(err.request, DOC_FILE);
        assert!(started.elapsed() >= DEFAULT_CHUNK_TIMEOUT);
        assert!(matches!(
            loader.chunk_state(2),
            ChunkStatus::Failed(ChunkLoadError { reason: ChunkFailure::Timeout, .. })
        ));

        let again = loader.ensure_chunk(2).await.unwrap_err();
        assert_eq!(again.reason, ChunkFailure::Timeout);
        assert_eq!(fetcher.fetch_count(DOC_FILE), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_timeout() {
        let fetcher = Arc::new(MemoryChunkFetcher::new().with_hanging(NAV_FILE));
        let loader = ModuleLoader::with_options(
            manifest(),
            Arc::clone(&fetcher) as Arc<dyn ChunkFetcher>,
            LoaderOptions::default().with_chunk_timeout(Duration::from_secs(5)),
        );
        let started = tokio::time::Instant::now();

        let err = loader.ensure_chunk(1).await.unwrap_err();

        assert_eq!(err.reason, ChunkFailure::Timeout);
        assert!(started.elapsed() < DEFAULT_CHUNK_TIMEOUT);
    }

    #[tokio::test]
    async fn test_chunk_not_in_manifest_is_missing() {
        let fetcher = Arc::new(MemoryChunkFetcher::new());
        let loader = loader_with(&fetcher);

        let err = loader.ensure_chunk(42).await.unwrap_err();

        assert_eq!(err.reason, ChunkFailure::Missing);
        assert_eq!(fetcher.total_fetches(), 0);
    }

    #[tokio::test]
    async fn test_absent_file_is_missing() {
        let fetcher = Arc::new(MemoryChunkFetcher::new());
        let loader = loader_with(&fetcher);

        let err = loader.ensure_chunk(1).await.unwrap_err();

        assert_eq!(err.reason, ChunkFailure::Missing);
        assert_eq!(
            err.to_string(),
            format!("Loading chunk 1 failed.\n(missing: {NAV_FILE})")
        );
    }

    #[tokio::test]
    async fn test_undecodable_chunk_is_malformed() {
        let fetcher = Arc::new(MemoryChunkFetcher::new().with_bytes(NAV_FILE, "<html>"));
        let loader = loader_with(&fetcher);

        let err = loader.ensure_chunk(1).await.unwrap_err();

        assert_eq!(err.reason, ChunkFailure::Malformed);
    }

    #[tokio::test]
    async fn test_chunk_id_mismatch_is_malformed() {
        let fetcher = Arc::new(MemoryChunkFetcher::new().with_payload(DOC_FILE, &nav_payload()));
        let loader = loader_with(&fetcher);

        let err = loader.ensure_chunk(2).await.unwrap_err();

        assert_eq!(err.reason, ChunkFailure::Malformed);
        assert!(!loader.modules().contains("nav:sidebar"));
    }

    #[tokio::test]
    async fn test_ensure_chunks_loads_all_and_reports_first_error() {
        let fetcher = Arc::new(MemoryChunkFetcher::new().with_payload(NAV_FILE, &nav_payload()));
        let loader = loader_with(&fetcher);

        let err = loader.ensure_chunks(&[1, 2]).await.unwrap_err();

        assert_eq!(err.chunk_id, 2);
        assert_eq!(loader.chunk_state(1), ChunkStatus::Loaded);
    }

    #[tokio::test]
    async fn test_ensure_chunks_success() {
        let fetcher = Arc::new(
            MemoryChunkFetcher::new()
                .with_payload(NAV_FILE, &nav_payload())
                .with_payload(DOC_FILE, &doc_payload()),
        );
        let loader = loader_with(&fetcher);

        loader.ensure_chunks(&[1, 2]).await.unwrap();

        assert!(loader.require("nav:sidebar").is_ok());
        assert!(loader.require("doc:intro:content").is_ok());
    }

    #[tokio::test]
    async fn test_chunk_modules_do_not_replace_existing_definitions() {
        let fetcher = Arc::new(MemoryChunkFetcher::new().with_payload(NAV_FILE, &nav_payload()));
        let loader = loader_with(&fetcher);
        let mut local = Map::new();
        local.insert("sidebar".to_owned(), json!(["local"]));
        loader.define("nav:sidebar", ModuleDefinition::data(Vec::new(), local));

        loader.ensure_chunk(1).await.unwrap();

        let exports = loader.require("nav:sidebar").unwrap();
        assert_eq!(exports.get("sidebar"), Some(json!(["local"])));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_pending_waiters() {
        let fetcher = Arc::new(MemoryChunkFetcher::new().with_hanging(DOC_FILE));
        let loader = loader_with(&fetcher);

        let waiter = tokio::spawn({
            let loader = loader.clone();
            async move { loader.ensure_chunk(2).await }
        });
        while loader.chunk_state(2) != ChunkStatus::Pending {
            tokio::task::yield_now().await;
        }

        loader.shutdown();

        let err = waiter.await.unwrap().unwrap_err();
        assert_eq!(err.reason, ChunkFailure::Cancelled);
        assert_eq!(err.request, DOC_FILE);
        assert!(matches!(
            loader.chunk_state(2),
            ChunkStatus::Failed(ChunkLoadError { reason: ChunkFailure::Cancelled, .. })
        ));

        let late = loader.ensure_chunk(1).await.unwrap_err();
        assert_eq!(late.reason, ChunkFailure::Cancelled);
    }

    #[tokio::test]
    async fn test_require_unknown_module() {
        let loader = loader_with(&Arc::new(MemoryChunkFetcher::new()));

        let err = loader.require("doc:missing:content").unwrap_err();

        assert!(matches!(err, LoaderError::ModuleNotFound { .. }));
    }
}
