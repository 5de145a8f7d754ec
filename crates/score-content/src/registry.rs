//! Content Registry: every document of the site with its compiled content.
//!
//! Documents are stored in a flat `Vec` in registration order with `HashMap`
//! indices for id and permalink lookups.

use std::collections::HashMap;

use crate::ContentError;
use crate::document::{Document, DocumentContent};

/// Build-time registry of documents. Immutable once built.
#[derive(Clone, Debug, Default)]
pub struct ContentRegistry {
    documents: Vec<Document>,
    contents: Vec<DocumentContent>,
    id_index: HashMap<String, usize>,
    permalink_index: HashMap<String, usize>,
}

impl ContentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document.
    ///
    /// Ids and permalinks must be unique.
    pub fn insert(
        &mut self,
        document: Document,
        content: DocumentContent,
    ) -> Result<(), ContentError> {
        if let Some(&existing) = self.id_index.get(&document.id) {
            return Err(ContentError::DuplicateId {
                id: document.id,
                first: self.documents[existing].source.clone(),
                second: document.source,
            });
        }
        if let Some(&existing) = self.permalink_index.get(&document.permalink) {
            return Err(ContentError::DuplicatePermalink {
                permalink: document.permalink,
                first: self.documents[existing].source.clone(),
                second: document.source,
            });
        }

        let idx = self.documents.len();
        self.id_index.insert(document.id.clone(), idx);
        self.permalink_index.insert(document.permalink.clone(), idx);
        self.documents.push(document);
        self.contents.push(content);
        Ok(())
    }

    /// All documents in registration order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Get document by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.id_index.get(id).map(|&i| &self.documents[i])
    }

    /// Get compiled content by document id.
    #[must_use]
    pub fn content(&self, id: &str) -> Option<&DocumentContent> {
        self.id_index.get(id).map(|&i| &self.contents[i])
    }

    /// Get document by permalink. A trailing slash is ignored.
    #[must_use]
    pub fn by_permalink(&self, permalink: &str) -> Option<&Document> {
        self.permalink_index
            .get(permalink)
            .or_else(|| self.permalink_index.get(permalink.trim_end_matches('/')))
            .or_else(|| self.permalink_index.get(&format!("{permalink}/")))
            .map(|&i| &self.documents[i])
    }

    /// Iterate over documents with their content.
    pub fn iter(&self) -> impl Iterator<Item = (&Document, &DocumentContent)> {
        self.documents.iter().zip(&self.contents)
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the registry has no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn doc(id: &str, permalink: &str) -> Document {
        Document {
            id: id.to_owned(),
            title: id.to_owned(),
            description: None,
            slug: format!("/{id}"),
            permalink: permalink.to_owned(),
            sidebar_label: None,
            sidebar_position: None,
            category: None,
            source: PathBuf::from(format!("{id}.md")),
            edit_url: None,
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut registry = ContentRegistry::new();
        registry
            .insert(doc("intro", "/docs/"), DocumentContent::default())
            .unwrap();
        registry
            .insert(doc("schema", "/docs/schema"), DocumentContent::default())
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("schema").unwrap().permalink, "/docs/schema");
        assert_eq!(registry.by_permalink("/docs/").unwrap().id, "intro");
        assert_eq!(registry.by_permalink("/docs").unwrap().id, "intro");
        assert_eq!(registry.by_permalink("/docs/schema/").unwrap().id, "schema");
        assert!(registry.by_permalink("/docs/missing").is_none());
        assert!(registry.content("intro").is_some());
    }

    #[test]
    fn test_preserves_registration_order() {
        let mut registry = ContentRegistry::new();
        for id in ["b", "a", "c"] {
            registry
                .insert(doc(id, &format!("/docs/{id}")), DocumentContent::default())
                .unwrap();
        }

        let ids: Vec<_> = registry.documents().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = ContentRegistry::new();
        registry
            .insert(doc("intro", "/docs/intro"), DocumentContent::default())
            .unwrap();

        let err = registry
            .insert(doc("intro", "/docs/other"), DocumentContent::default())
            .unwrap_err();

        assert!(matches!(err, ContentError::DuplicateId { ref id, .. } if id == "intro"));
    }

    #[test]
    fn test_duplicate_permalink_rejected() {
        let mut registry = ContentRegistry::new();
        registry
            .insert(doc("a", "/docs/same"), DocumentContent::default())
            .unwrap();

        let err = registry
            .insert(doc("b", "/docs/same"), DocumentContent::default())
            .unwrap_err();

        assert!(matches!(err, ContentError::DuplicatePermalink { .. }));
    }
}
