//! Chunk file format and the chunk manifest.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A module as stored in a chunk file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModulePayload {
    /// Ids of modules required before this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<String>,
    /// Exported values.
    #[serde(default)]
    pub exports: Map<String, Value>,
}

/// Contents of a chunk file: `{"chunk": 2, "modules": {"<id>": {...}}}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkPayload {
    /// Chunk id. Must match the id the chunk was requested under.
    pub chunk: u32,
    /// Modules keyed by id.
    pub modules: BTreeMap<String, ModulePayload>,
}

impl ChunkPayload {
    /// Create an empty chunk.
    #[must_use]
    pub fn new(chunk: u32) -> Self {
        Self {
            chunk,
            modules: BTreeMap::new(),
        }
    }

    /// Add a module.
    #[must_use]
    pub fn with_module(
        mut self,
        module_id: impl Into<String>,
        deps: Vec<String>,
        exports: Map<String, Value>,
    ) -> Self {
        self.modules
            .insert(module_id.into(), ModulePayload { deps, exports });
        self
    }

    /// Serialize to the on-disk JSON form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Mapping from chunk id to its file, relative to the build output directory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkManifest {
    files: BTreeMap<u32, String>,
}

impl ChunkManifest {
    /// Create an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chunk file.
    #[must_use]
    pub fn with_chunk(mut self, chunk_id: u32, file: impl Into<String>) -> Self {
        self.insert(chunk_id, file);
        self
    }

    /// Add or replace a chunk file.
    pub fn insert(&mut self, chunk_id: u32, file: impl Into<String>) {
        self.files.insert(chunk_id, file.into());
    }

    /// File of a chunk.
    #[must_use]
    pub fn file(&self, chunk_id: u32) -> Option<&str> {
        self.files.get(&chunk_id).map(String::as_str)
    }

    /// All chunks in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.files.iter().map(|(id, file)| (*id, file.as_str()))
    }

    /// Number of chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the manifest lists no chunks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
