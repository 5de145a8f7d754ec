//! Sidebar tree and reading-order navigation.
//!
//! [`build_sidebar`] is a pure function of the document list and the
//! configured categories: the same input always yields a structurally equal
//! tree. Previous/next links are derived by flattening the tree depth-first.

use std::collections::HashMap;

use score_config::CategoryConfig;
use score_content::Document;
use serde::{Deserialize, Serialize};

/// Node of the sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SidebarEntry {
    /// Link to a document.
    Link {
        label: String,
        href: String,
        #[serde(rename = "docId")]
        doc_id: String,
    },
    /// Group of entries.
    Category {
        label: String,
        items: Vec<SidebarEntry>,
        collapsed: bool,
        collapsible: bool,
    },
}

impl SidebarEntry {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Link { label, .. } | Self::Category { label, .. } => label,
        }
    }

    /// Whether this entry is, or contains, a link to `doc_id`.
    #[must_use]
    pub fn contains_doc(&self, doc_id: &str) -> bool {
        match self {
            Self::Link { doc_id: id, .. } => id == doc_id,
            Self::Category { items, .. } => items.iter().any(|item| item.contains_doc(doc_id)),
        }
    }

    fn collect_links(&self, out: &mut Vec<NavLink>) {
        match self {
            Self::Link {
                label,
                href,
                doc_id,
            } => out.push(NavLink {
                label: label.clone(),
                href: href.clone(),
                doc_id: doc_id.clone(),
            }),
            Self::Category { items, .. } => {
                for item in items {
                    item.collect_links(out);
                }
            }
        }
    }
}

/// Flattened link to a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    /// Display label.
    pub label: String,
    /// Document permalink.
    pub href: String,
    /// Document id.
    pub doc_id: String,
}

/// Neighbours of a document in reading order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrevNext {
    /// Preceding document, `None` at the first position.
    pub previous: Option<NavLink>,
    /// Following document, `None` at the last position.
    pub next: Option<NavLink>,
}

/// Sidebar tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sidebar {
    entries: Vec<SidebarEntry>,
}

impl Sidebar {
    /// Create a sidebar from top-level entries.
    #[must_use]
    pub fn new(entries: Vec<SidebarEntry>) -> Self {
        Self { entries }
    }

    /// Top-level entries.
    #[must_use]
    pub fn entries(&self) -> &[SidebarEntry] {
        &self.entries
    }

    /// Whether the sidebar is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All links in depth-first order.
    #[must_use]
    pub fn links(&self) -> Vec<NavLink> {
        let mut links = Vec::new();
        for entry in &self.entries {
            entry.collect_links(&mut links);
        }
        links
    }

    /// Previous and next links of a document.
    ///
    /// Both are `None` when the document is not in the sidebar.
    #[must_use]
    pub fn prev_next(&self, doc_id: &str) -> PrevNext {
        let mut links = self.links();
        let Some(idx) = links.iter().position(|link| link.doc_id == doc_id) else {
            return PrevNext::default();
        };

        let next = (idx + 1 < links.len()).then(|| links.swap_remove(idx + 1));
        let previous = idx.checked_sub(1).map(|prev| links.swap_remove(prev));
        PrevNext { previous, next }
    }
}

enum Slot {
    Link(usize),
    Category(String),
}

/// Build the sidebar tree.
///
/// Documents are stably ordered by `sidebar_position`; documents without a
/// position keep their input order after the positioned ones. Configured
/// categories come first in configured order (empty ones are skipped), then the
/// remaining top-level links and categories in order of first appearance.
#[must_use]
pub fn build_sidebar(documents: &[Document], categories: &[CategoryConfig]) -> Sidebar {
    let mut ordered: Vec<&Document> = documents.iter().collect();
    ordered.sort_by_key(|doc| (doc.sidebar_position.is_none(), doc.sidebar_position));

    let mut slots = Vec::new();
    let mut links: Vec<SidebarEntry> = Vec::with_capacity(ordered.len());
    let mut grouped: HashMap<&str, Vec<usize>> = HashMap::new();

    for doc in ordered {
        let idx = links.len();
        links.push(SidebarEntry::Link {
            label: doc.sidebar_title().to_owned(),
            href: doc.permalink.clone(),
            doc_id: doc.id.clone(),
        });

        match doc.category.as_deref() {
            None => slots.push(Slot::Link(idx)),
            Some(label) => {
                let members = grouped.entry(label).or_default();
                if members.is_empty() {
                    slots.push(Slot::Category(label.to_owned()));
                }
                members.push(idx);
            }
        }
    }

    let take = |indices: &[usize]| -> Vec<SidebarEntry> {
        indices.iter().map(|&i| links[i].clone()).collect()
    };

    let mut entries = Vec::new();
    for category in categories {
        if let Some(members) = grouped.get(category.label.as_str()) {
            entries.push(SidebarEntry::Category {
                label: category.label.clone(),
                items: take(members),
                collapsed: category.collapsed,
                collapsible: category.collapsible,
            });
        }
    }

    for slot in slots {
        match slot {
            Slot::Link(idx) => entries.push(links[idx].clone()),
            Slot::Category(label) => {
                if categories.iter().any(|c| c.label == label) {
                    continue;
                }
                let items = take(&grouped[label.as_str()]);
                entries.push(SidebarEntry::Category {
                    label,
                    items,
                    collapsed: true,
                    collapsible: true,
                });
            }
        }
    }

    Sidebar::new(entries)
}
