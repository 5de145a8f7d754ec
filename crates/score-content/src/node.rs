//! Content tree node types.
//!
//! The content tree is produced at build time by [`compile`](crate::compile)
//! and consumed by the renderer. It is a closed set of node kinds; the
//! [`ContentNode::Unknown`] variant only exists so that trees written by a newer
//! build can still be deserialized.

use serde::{Deserialize, Serialize};

/// Column alignment for table cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// No explicit alignment.
    #[default]
    None,
    /// Left-aligned.
    Left,
    /// Centered.
    Center,
    /// Right-aligned.
    Right,
}

/// A single table cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Inline content of the cell.
    pub children: Vec<ContentNode>,
}

/// A node of the document content tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentNode {
    /// Section heading with its anchor id.
    Heading {
        level: u8,
        id: String,
        children: Vec<ContentNode>,
    },
    /// Paragraph of inline content.
    Paragraph { children: Vec<ContentNode> },
    /// Fenced or indented code block.
    CodeBlock {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        code: String,
    },
    /// Table with a header row.
    Table {
        alignments: Vec<Alignment>,
        head: Vec<TableCell>,
        rows: Vec<Vec<TableCell>>,
    },
    /// Inline code span.
    InlineCode { code: String },
    /// Hyperlink.
    Link {
        href: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        children: Vec<ContentNode>,
    },
    /// Plain text.
    Text { text: String },
    /// Strong emphasis.
    Strong { children: Vec<ContentNode> },
    /// Emphasis.
    Emphasis { children: Vec<ContentNode> },
    /// Strikethrough.
    Strikethrough { children: Vec<ContentNode> },
    /// Ordered or unordered list. Each item is a sequence of nodes.
    List {
        ordered: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<u64>,
        items: Vec<Vec<ContentNode>>,
    },
    /// Block quote.
    Blockquote { children: Vec<ContentNode> },
    /// Hard line break.
    LineBreak,
    /// Thematic break.
    Rule,
    /// Node kind not known to this version.
    #[serde(other)]
    Unknown,
}

impl ContentNode {
    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Child nodes of container kinds. Empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[ContentNode] {
        match self {
            Self::Heading { children, .. }
            | Self::Paragraph { children }
            | Self::Link { children, .. }
            | Self::Strong { children }
            | Self::Emphasis { children }
            | Self::Strikethrough { children }
            | Self::Blockquote { children } => children,
            Self::CodeBlock { .. }
            | Self::Table { .. }
            | Self::InlineCode { .. }
            | Self::Text { .. }
            | Self::List { .. }
            | Self::LineBreak
            | Self::Rule
            | Self::Unknown => &[],
        }
    }

    /// Concatenated plain text of this node and its descendants.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text { text } => out.push_str(text),
            Self::InlineCode { code } | Self::CodeBlock { code, .. } => out.push_str(code),
            Self::LineBreak => out.push(' '),
            Self::List { items, .. } => {
                for node in items.iter().flatten() {
                    node.collect_text(out);
                }
            }
            Self::Table { head, rows, .. } => {
                for cell in head.iter().chain(rows.iter().flatten()) {
                    for node in &cell.children {
                        node.collect_text(out);
                    }
                }
            }
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading level (2-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}
