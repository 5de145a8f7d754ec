//! Bundle emission: chunk files plus the site manifest.
//!
//! # Layout
//!
//! ```text
//! {output_dir}/
//!   manifest.json
//!   chunks/
//!     {name-hash}.{content-hash}.json
//! ```
//!
//! Chunk 1 holds the navigation module. Every document gets its own chunk,
//! numbered from 2 in registry order, with a metadata module and a content
//! module that depends on it. Name and content hashes are the first 8 hex
//! characters of SHA-256, so an unchanged chunk keeps its file name across
//! builds.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use score_loader::{ChunkManifest, ChunkPayload};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::manifest::{
    MANIFEST_FILENAME, MANIFEST_VERSION, NAVIGATION_CHUNK, NAVIGATION_MODULE, Route,
    SiteManifest, content_module, metadata_module,
};
use crate::{BundleError, Site};

/// Directory under the output directory holding chunk files.
pub const CHUNKS_DIR: &str = "chunks";

/// Length of the name and content hashes in chunk file names.
const HASH_LEN: usize = 8;

/// Site-level values recorded in the manifest.
#[derive(Clone, Debug)]
pub struct BundleOptions {
    /// Base URL the site is served under.
    pub public_path: String,
    /// Permalink prefix of the documentation, e.g. `/docs/`.
    pub docs_root: String,
    /// Site title.
    pub title: String,
    /// Site tagline.
    pub tagline: String,
}

/// Short document entry exported by the navigation module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocSummary {
    /// Document id.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Document permalink.
    pub permalink: String,
}

/// Write chunk files and `manifest.json` for a site.
///
/// Chunk files in `chunks/` that are not part of this build are removed.
pub fn emit_bundle(
    site: &Site,
    output_dir: &Path,
    options: &BundleOptions,
) -> Result<SiteManifest, BundleError> {
    let chunks_dir = output_dir.join(CHUNKS_DIR);
    fs::create_dir_all(&chunks_dir).map_err(|source| io_error(&chunks_dir, source))?;

    let mut writer = ChunkWriter::new(chunks_dir);

    let docs: Vec<_> = site
        .documents()
        .iter()
        .map(|doc| DocSummary {
            id: doc.id.clone(),
            title: doc.title.clone(),
            permalink: doc.permalink.clone(),
        })
        .collect();
    let navigation = ChunkPayload::new(NAVIGATION_CHUNK).with_module(
        NAVIGATION_MODULE,
        Vec::new(),
        exports([
            ("sidebar", serde_json::to_value(site.sidebar())?),
            ("docs", serde_json::to_value(&docs)?),
        ]),
    );
    writer.write("nav", &navigation)?;

    let mut routes = BTreeMap::new();
    for (idx, (doc, content)) in site.registry().iter().enumerate() {
        let chunk_id = u32::try_from(idx)
            .ok()
            .and_then(|i| i.checked_add(NAVIGATION_CHUNK + 1))
            .ok_or(BundleError::TooManyDocuments(idx))?;
        let nav = site.prev_next(&doc.id);
        let metadata = metadata_module(&doc.id);
        let entry = content_module(&doc.id);

        let payload = ChunkPayload::new(chunk_id)
            .with_module(
                metadata.clone(),
                Vec::new(),
                exports([
                    ("document", serde_json::to_value(doc)?),
                    ("previous", serde_json::to_value(&nav.previous)?),
                    ("next", serde_json::to_value(&nav.next)?),
                ]),
            )
            .with_module(
                entry.clone(),
                vec![metadata],
                exports([
                    ("toc", serde_json::to_value(&content.toc)?),
                    ("nodes", serde_json::to_value(&content.nodes)?),
                ]),
            );
        writer.write(&format!("doc:{}", doc.id), &payload)?;

        routes.insert(
            doc.permalink.clone(),
            Route {
                chunks: vec![chunk_id],
                module: entry,
            },
        );
    }

    let removed = writer.remove_stale()?;

    let manifest = SiteManifest {
        version: MANIFEST_VERSION,
        public_path: options.public_path.clone(),
        docs_root: options.docs_root.clone(),
        title: options.title.clone(),
        tagline: options.tagline.clone(),
        chunks: writer.manifest,
        navigation: Route {
            chunks: vec![NAVIGATION_CHUNK],
            module: NAVIGATION_MODULE.to_owned(),
        },
        routes,
    };

    let manifest_path = output_dir.join(MANIFEST_FILENAME);
    fs::write(&manifest_path, serde_json::to_vec_pretty(&manifest)?)
        .map_err(|source| io_error(&manifest_path, source))?;

    tracing::info!(
        chunks = manifest.chunks.len(),
        routes = manifest.routes.len(),
        removed,
        output = %output_dir.display(),
        "Bundle written"
    );
    Ok(manifest)
}

struct ChunkWriter {
    dir: PathBuf,
    manifest: ChunkManifest,
    written: HashSet<String>,
}

impl ChunkWriter {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            manifest: ChunkManifest::new(),
            written: HashSet::new(),
        }
    }

    fn write(&mut self, name: &str, payload: &ChunkPayload) -> Result<(), BundleError> {
        let bytes = payload.to_bytes()?;
        let file_name = format!(
            "{}.{}.json",
            short_hash(name.as_bytes()),
            short_hash(&bytes)
        );
        let path = self.dir.join(&file_name);

        // Content-addressed: an existing file with this name has these bytes
        if !path.exists() {
            fs::write(&path, &bytes).map_err(|source| io_error(&path, source))?;
        }

        self.manifest
            .insert(payload.chunk, format!("{CHUNKS_DIR}/{file_name}"));
        self.written.insert(file_name);
        Ok(())
    }

    fn remove_stale(&self) -> Result<usize, BundleError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| io_error(&self.dir, source))?;
        let mut removed = 0;

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.ends_with(".json") || self.written.contains(&name) {
                continue;
            }
            let path = entry.path();
            fs::remove_file(&path).map_err(|source| io_error(&path, source))?;
            tracing::debug!(path = %path.display(), "Removed stale chunk");
            removed += 1;
        }

        Ok(removed)
    }
}

fn exports<const N: usize>(values: [(&str, Value); N]) -> Map<String, Value> {
    values
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

fn short_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut hex = hex::encode(digest);
    hex.truncate(HASH_LEN);
    hex
}

fn io_error(path: &Path, source: std::io::Error) -> BundleError {
    BundleError::Io {
        path: path.to_path_buf(),
        source,
    }
}
