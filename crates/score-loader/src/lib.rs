//! On-demand module loader for Score.
//!
//! The site build emits its data as chunks: JSON files that each contain a set
//! of modules. A [`ModuleLoader`] fetches chunks when they are first needed,
//! registers the modules they contain and executes each module at most once.
//!
//! # Architecture
//!
//! - [`ModuleTable`] holds module records and memoizes their [`Exports`]
//! - [`ModuleLoader`] drives the per-chunk state machine on top of the table
//! - [`ChunkFetcher`] abstracts where chunk bytes come from ([`FsChunkFetcher`],
//!   or `MemoryChunkFetcher` behind the `mock` feature)
//! - [`ChunkManifest`] maps chunk ids to files, baked in at build time
//!
//! The loader is an explicit object owned by its host. Tests build isolated
//! instances; the server creates one at startup and calls
//! [`ModuleLoader::shutdown`] when it stops.

mod chunk;
mod error;
mod exports;
mod fetch;
mod loader;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod module;

pub use chunk::{ChunkManifest, ChunkPayload, ModulePayload};
pub use error::{ChunkFailure, ChunkLoadError, FetchError, FetchErrorKind, LoaderError};
pub use exports::Exports;
pub use fetch::{ChunkFetcher, ChunkRequest, FsChunkFetcher};
pub use loader::{ChunkStatus, DEFAULT_CHUNK_TIMEOUT, LoaderOptions, ModuleLoader};
#[cfg(any(test, feature = "mock"))]
pub use mock::MemoryChunkFetcher;
pub use module::{ModuleDefinition, ModuleTable};
