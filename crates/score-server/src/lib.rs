//! HTTP server for Score documentation sites.
//!
//! The server hosts one [`ModuleLoader`] per process over a build output
//! directory and serves:
//! - the landing page at the base URL
//! - documentation pages at their permalinks
//! - `GET /api/navigation` and `GET /api/pages/{permalink}` as JSON
//! - static assets, then build output files, for everything else
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (score-server)
//!                        │
//!                        ├─► pages / API ──► ModuleLoader ──► chunks/*.json
//!                        │                        │
//!                        │                        └─► PageRenderer
//!                        │
//!                        └─► static files (static dir, then output dir)
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use score_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use score_config::{Config, LandingConfig};
use score_loader::{ChunkFetcher, DEFAULT_CHUNK_TIMEOUT, FsChunkFetcher, LoaderOptions, ModuleLoader};
use score_renderer::{LandingPage, PageRenderer};
use score_site::SiteManifest;

pub use error::ServerError;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Build output directory holding `manifest.json` and `chunks/`.
    pub output_dir: PathBuf,
    /// Static assets directory.
    pub static_dir: PathBuf,
    /// Per-chunk fetch timeout.
    pub chunk_timeout: Duration,
    /// Landing page settings.
    pub landing: LandingConfig,
    /// Application version (for `ETag`s).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            output_dir: PathBuf::from("build"),
            static_dir: PathBuf::from("static"),
            chunk_timeout: DEFAULT_CHUNK_TIMEOUT,
            landing: LandingConfig::default(),
            version: String::new(),
        }
    }
}

impl ServerConfig {
    /// Create server configuration from a loaded `score.toml`.
    #[must_use]
    pub fn from_config(config: &Config, version: impl Into<String>) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            output_dir: config.docs_resolved.output_dir.clone(),
            static_dir: config.docs_resolved.static_dir.clone(),
            chunk_timeout: config.loader.chunk_timeout(),
            landing: config.landing.clone(),
            version: version.into(),
        }
    }
}

/// A configured server: site manifest, module loader and router state.
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a server that fetches chunks with `fetcher`.
    #[must_use]
    pub fn new(config: &ServerConfig, manifest: SiteManifest, fetcher: Arc<dyn ChunkFetcher>) -> Self {
        let loader = ModuleLoader::with_options(
            manifest.chunks.clone(),
            fetcher,
            LoaderOptions::default().with_chunk_timeout(config.chunk_timeout),
        );
        let renderer = PageRenderer::new(
            manifest.title.clone(),
            manifest.public_path.clone(),
            manifest.docs_root.clone(),
        );
        let landing = LandingPage::new(
            manifest.title.clone(),
            manifest.tagline.clone(),
            manifest.public_path.clone(),
            manifest.docs_root.clone(),
            config.static_dir.clone(),
        )
        .with_config(&config.landing);

        Self {
            state: Arc::new(AppState {
                loader,
                manifest,
                renderer,
                landing,
                static_dir: config.static_dir.clone(),
                output_dir: config.output_dir.clone(),
                version: config.version.clone(),
            }),
        }
    }

    /// Create a server over the build output in `config.output_dir`.
    pub fn from_output_dir(config: &ServerConfig) -> Result<Self, ServerError> {
        let manifest = SiteManifest::load(&config.output_dir)?;
        let fetcher = Arc::new(FsChunkFetcher::new(config.output_dir.clone()));
        Ok(Self::new(config, manifest, fetcher))
    }

    /// The process-wide module loader.
    #[must_use]
    pub fn loader(&self) -> &ModuleLoader {
        &self.state.loader
    }

    /// The site manifest being served.
    #[must_use]
    pub fn manifest(&self) -> &SiteManifest {
        &self.state.manifest
    }

    /// Build the axum router.
    #[must_use]
    pub fn router(&self) -> Router {
        app::create_router(Arc::clone(&self.state))
    }
}

/// Run the server until Ctrl-C.
///
/// On shutdown the module loader is shut down, cancelling in-flight chunk
/// fetches.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let server = Server::from_output_dir(&config)?;
    let loader = server.loader().clone();
    let app = server.router();

    let address = format!("{}:{}", config.host, config.port);
    let addr = SocketAddr::from_str(&address).map_err(|e| ServerError::Address {
        address: address.clone(),
        message: e.to_string(),
    })?;
    tracing::info!(
        address = %addr,
        base_url = %server.manifest().public_path,
        routes = server.manifest().routes.len(),
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            loader.shutdown();
        })
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to listen for Ctrl-C, graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}
