//! Site snapshot: content registry plus its sidebar.

use std::path::Path;

use score_config::CategoryConfig;
use score_content::{ContentError, ContentRegistry, Document, DocumentContent, DocumentOptions};

use crate::sidebar::{PrevNext, Sidebar, build_sidebar};

/// Built documentation site.
///
/// Immutable once built; rebuilding produces a new snapshot.
#[derive(Clone, Debug)]
pub struct Site {
    registry: ContentRegistry,
    sidebar: Sidebar,
}

impl Site {
    /// Build a site from a registry and the configured categories.
    #[must_use]
    pub fn new(registry: ContentRegistry, categories: &[CategoryConfig]) -> Self {
        let sidebar = build_sidebar(registry.documents(), categories);
        Self { registry, sidebar }
    }

    /// Compile every markdown source under `source_dir` and assemble the site.
    pub fn load(
        source_dir: &Path,
        options: &DocumentOptions,
        categories: &[CategoryConfig],
    ) -> Result<Self, ContentError> {
        let registry = score_content::load_dir(source_dir, options)?;
        Ok(Self::new(registry, categories))
    }

    /// Content registry.
    #[must_use]
    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    /// Sidebar tree.
    #[must_use]
    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    /// All documents in registry order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        self.registry.documents()
    }

    /// Get document by id.
    #[must_use]
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.registry.get(id)
    }

    /// Get compiled content by document id.
    #[must_use]
    pub fn content(&self, id: &str) -> Option<&DocumentContent> {
        self.registry.content(id)
    }

    /// Get document by permalink.
    #[must_use]
    pub fn by_permalink(&self, permalink: &str) -> Option<&Document> {
        self.registry.by_permalink(permalink)
    }

    /// Reading-order neighbours of a document.
    #[must_use]
    pub fn prev_next(&self, id: &str) -> PrevNext {
        self.sidebar.prev_next(id)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_load_builds_sidebar_from_directories() {
        let temp = tempfile::tempdir().unwrap();
        let docs = temp.path();
        fs::create_dir_all(docs.join("getting-started")).unwrap();
        fs::create_dir_all(docs.join("guides")).unwrap();
        fs::write(
            docs.join("getting-started/intro.md"),
            "---\nsidebar_position: 1\n---\n# Introduction\n",
        )
        .unwrap();
        fs::write(
            docs.join("getting-started/quickstart-java.md"),
            "---\nsidebar_position: 2\n---\n# Quick Start (Java)\n",
        )
        .unwrap();
        fs::write(docs.join("guides/installation.md"), "# Installation\n").unwrap();

        let site = Site::load(docs, &DocumentOptions::default(), &[]).unwrap();

        let labels: Vec<_> = site
            .sidebar()
            .entries()
            .iter()
            .map(crate::SidebarEntry::label)
            .collect();
        assert_eq!(labels, vec!["Getting Started", "Guides"]);

        let nav = site.prev_next("getting-started/quickstart-java");
        assert_eq!(nav.previous.unwrap().label, "Introduction");
        assert_eq!(nav.next.unwrap().doc_id, "guides/installation");

        let doc = site.by_permalink("/docs/guides/installation").unwrap();
        assert_eq!(doc.title, "Installation");
        assert!(site.content(&doc.id).is_some());
    }
}
