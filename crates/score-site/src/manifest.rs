//! Site manifest written next to the chunk files.
//!
//! The manifest is the only file a host needs to read up front: it maps chunk
//! ids to files and permalinks to the chunks and module that render them.

use std::collections::BTreeMap;
use std::path::Path;

use score_loader::ChunkManifest;
use serde::{Deserialize, Serialize};

use crate::BundleError;

/// File name of the site manifest inside the output directory.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Manifest format version.
pub const MANIFEST_VERSION: u32 = 1;

/// Chunk holding the navigation module.
pub const NAVIGATION_CHUNK: u32 = 1;

/// Module exporting the sidebar tree.
pub const NAVIGATION_MODULE: &str = "nav:sidebar";

/// Id of the module exporting a document's metadata and neighbours.
#[must_use]
pub fn metadata_module(doc_id: &str) -> String {
    format!("doc:{doc_id}:metadata")
}

/// Id of the module exporting a document's content tree and table of contents.
#[must_use]
pub fn content_module(doc_id: &str) -> String {
    format!("doc:{doc_id}:content")
}

/// Chunks to load and module to require for one route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Chunks that must be loaded first.
    pub chunks: Vec<u32>,
    /// Entry module.
    pub module: String,
}

/// Build output index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteManifest {
    /// Format version.
    pub version: u32,
    /// Base URL the site is served under.
    pub public_path: String,
    /// Permalink prefix of the documentation.
    pub docs_root: String,
    /// Site title.
    pub title: String,
    /// Site tagline.
    #[serde(default)]
    pub tagline: String,
    /// Chunk id to file mapping.
    pub chunks: ChunkManifest,
    /// Route to the navigation module.
    pub navigation: Route,
    /// Document routes keyed by permalink.
    pub routes: BTreeMap<String, Route>,
}

impl SiteManifest {
    /// Read the manifest from a build output directory.
    pub fn load(output_dir: &Path) -> Result<Self, BundleError> {
        let path = output_dir.join(MANIFEST_FILENAME);
        let bytes = std::fs::read(&path).map_err(|source| BundleError::Io {
            path: path.clone(),
            source,
        })?;
        let manifest: Self = serde_json::from_slice(&bytes)?;

        if manifest.version != MANIFEST_VERSION {
            return Err(BundleError::UnsupportedVersion {
                found: manifest.version,
                expected: MANIFEST_VERSION,
            });
        }
        Ok(manifest)
    }

    /// Find the route for a request path. A trailing slash is ignored.
    #[must_use]
    pub fn route(&self, path: &str) -> Option<&Route> {
        self.routes
            .get(path)
            .or_else(|| self.routes.get(path.trim_end_matches('/')))
            .or_else(|| self.routes.get(&format!("{path}/")))
    }
}
