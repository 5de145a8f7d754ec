//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;

use score_loader::ModuleLoader;
use score_renderer::{LandingPage, PageRenderer};
use score_site::SiteManifest;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Module loader for the build output.
    pub(crate) loader: ModuleLoader,
    /// Site manifest the loader was created from.
    pub(crate) manifest: SiteManifest,
    /// Documentation page renderer.
    pub(crate) renderer: PageRenderer,
    /// Landing page.
    pub(crate) landing: LandingPage,
    /// Static assets directory.
    pub(crate) static_dir: PathBuf,
    /// Build output directory.
    pub(crate) output_dir: PathBuf,
    /// Application version (for `ETag`s).
    pub(crate) version: String,
}
