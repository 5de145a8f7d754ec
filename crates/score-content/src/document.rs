//! Documents and their compiled content.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compile::{CompiledDocument, compile};
use crate::front_matter::FrontMatter;
use crate::node::{ContentNode, TocEntry};
use crate::ContentError;

/// URL layout used to derive permalinks and edit links.
#[derive(Clone, Debug)]
pub struct DocumentOptions {
    /// Site base URL, starting and ending with `/`.
    pub base_url: String,
    /// Route segment under which documents are served.
    pub docs_route: String,
    /// Prefix for "Edit this page" links. The source path is appended.
    pub edit_url: Option<String>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            base_url: "/".to_owned(),
            docs_route: "docs".to_owned(),
            edit_url: None,
        }
    }
}

impl DocumentOptions {
    /// Root URL of the docs route (e.g. `/SymphonyQL/docs/`).
    #[must_use]
    pub fn docs_root(&self) -> String {
        format!("{}{}/", self.base_url, self.docs_route)
    }

    /// Build the permalink for a slug.
    ///
    /// Slug `/` maps to the docs root; any other slug is appended without a
    /// trailing slash.
    #[must_use]
    pub fn permalink(&self, slug: &str) -> String {
        format!("{}{}{}", self.base_url, self.docs_route, slug)
    }
}

/// Document metadata. Immutable after build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document id (e.g. `guides/installation`).
    pub id: String,
    /// Page title.
    pub title: String,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Slug relative to the docs route, always starting with `/`.
    pub slug: String,
    /// Absolute URL path of the rendered page.
    pub permalink: String,
    /// Sidebar label override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_label: Option<String>,
    /// Sidebar ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_position: Option<u32>,
    /// Sidebar category label, `None` for top-level links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Source path relative to the source directory.
    pub source: PathBuf,
    /// Link to edit the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
}

impl Document {
    /// Label shown in the sidebar.
    #[must_use]
    pub fn sidebar_title(&self) -> &str {
        self.sidebar_label.as_deref().unwrap_or(&self.title)
    }
}

/// Compiled content of a document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentContent {
    /// Table of contents.
    pub toc: Vec<TocEntry>,
    /// Content tree.
    pub nodes: Vec<ContentNode>,
}

/// A document parsed from a markdown source.
#[derive(Clone, Debug)]
pub struct ParsedDocument {
    pub document: Document,
    pub content: DocumentContent,
    /// Constructs dropped by the compiler.
    pub warnings: Vec<String>,
}

/// Parse a markdown source into a document.
///
/// # Arguments
///
/// * `source` - Path relative to the source directory (e.g. `guides/installation.md`)
/// * `markdown` - Source text including optional front matter
/// * `options` - URL layout
pub fn parse_document(
    source: &Path,
    markdown: &str,
    options: &DocumentOptions,
) -> Result<ParsedDocument, ContentError> {
    let compiled = compile(markdown);
    let first_paragraph = compiled.first_paragraph_text();
    let CompiledDocument {
        front_matter,
        title,
        toc,
        nodes,
        warnings,
    } = compiled;
    let front_matter = FrontMatter::from_yaml(front_matter.as_deref().unwrap_or_default())?;

    let description = front_matter.description.clone().or(first_paragraph);

    let path_id = id_from_path(source);
    let id = front_matter.id.unwrap_or(path_id);
    let slug = normalize_slug(front_matter.slug.as_deref().unwrap_or(&id));
    let title = front_matter.title.or(title).unwrap_or_else(|| {
        let stem = source.file_stem().unwrap_or_default().to_string_lossy();
        title_from_name(&stem)
    });
    let category = front_matter.sidebar_category.or_else(|| {
        source
            .parent()
            .and_then(Path::file_name)
            .map(|name| title_from_name(&name.to_string_lossy()))
    });
    let edit_url = options
        .edit_url
        .as_deref()
        .map(|prefix| join_url(prefix, &source_url_path(source)));

    Ok(ParsedDocument {
        document: Document {
            permalink: options.permalink(&slug),
            id,
            title,
            description,
            slug,
            sidebar_label: front_matter.sidebar_label,
            sidebar_position: front_matter.sidebar_position,
            category,
            source: source.to_path_buf(),
            edit_url,
        },
        content: DocumentContent { toc, nodes },
        warnings,
    })
}

/// Derive a document id from its source path: forward slashes, no extension.
fn id_from_path(source: &Path) -> String {
    source_url_path(&source.with_extension(""))
}

fn source_url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Normalize a slug to start with `/` and carry no trailing slash.
fn normalize_slug(slug: &str) -> String {
    let trimmed = slug.trim().trim_matches('/');
    format!("/{trimmed}")
}

fn join_url(prefix: &str, path: &str) -> String {
    if prefix.ends_with('/') {
        format!("{prefix}{path}")
    } else {
        format!("{prefix}/{path}")
    }
}

/// Generate a title from a file or directory name.
pub(crate) fn title_from_name(name: &str) -> String {
    name.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn symphony_options() -> DocumentOptions {
        DocumentOptions {
            base_url: "/SymphonyQL/".to_owned(),
            docs_route: "docs".to_owned(),
            edit_url: Some("https://github.com/bitlap/SymphonyQL/edit/master/docs".to_owned()),
        }
    }

    #[test]
    fn test_parse_document_derives_metadata_from_path_and_body() {
        let markdown = "# Installing SymphonyQL\n\nSymphonyQL only supports Scala 3.\n\n## sbt\n";

        let parsed =
            parse_document(Path::new("guides/installation.md"), markdown, &symphony_options())
                .unwrap();

        assert_eq!(
            parsed.document,
            Document {
                id: "guides/installation".to_owned(),
                title: "Installing SymphonyQL".to_owned(),
                description: Some("SymphonyQL only supports Scala 3.".to_owned()),
                slug: "/guides/installation".to_owned(),
                permalink: "/SymphonyQL/docs/guides/installation".to_owned(),
                sidebar_label: None,
                sidebar_position: None,
                category: Some("Guides".to_owned()),
                source: PathBuf::from("guides/installation.md"),
                edit_url: Some(
                    "https://github.com/bitlap/SymphonyQL/edit/master/docs/guides/installation.md"
                        .to_owned()
                ),
            }
        );
        assert_eq!(parsed.content.toc.len(), 1);
    }

    #[test]
    fn test_parse_document_front_matter_overrides() {
        let markdown = "---\nid: intro\ntitle: Introduction\nslug: /\nsidebar_position: 1\nsidebar_category: Getting Started\n---\n\n# Welcome\n";

        let parsed =
            parse_document(Path::new("intro.md"), markdown, &symphony_options()).unwrap();

        assert_eq!(parsed.document.id, "intro");
        assert_eq!(parsed.document.title, "Introduction");
        assert_eq!(parsed.document.slug, "/");
        assert_eq!(parsed.document.permalink, "/SymphonyQL/docs/");
        assert_eq!(parsed.document.sidebar_position, Some(1));
        assert_eq!(parsed.document.category.as_deref(), Some("Getting Started"));
    }

    #[test]
    fn test_parse_document_top_level_has_no_category() {
        let parsed =
            parse_document(Path::new("schema.md"), "Body only.", &DocumentOptions::default())
                .unwrap();

        assert_eq!(parsed.document.category, None);
        assert_eq!(parsed.document.title, "Schema");
        assert_eq!(parsed.document.permalink, "/docs/schema");
        assert_eq!(parsed.document.edit_url, None);
    }

    #[test]
    fn test_parse_document_invalid_front_matter() {
        let result = parse_document(
            Path::new("bad.md"),
            "---\nsidebar_position: first\n---\n",
            &DocumentOptions::default(),
        );

        assert!(matches!(result, Err(ContentError::FrontMatter(_))));
    }

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("schema"), "/schema");
        assert_eq!(normalize_slug("/schema/"), "/schema");
        assert_eq!(normalize_slug("/"), "/");
        assert_eq!(normalize_slug(""), "/");
    }

    #[test]
    fn test_title_from_name() {
        assert_eq!(title_from_name("getting-started"), "Getting Started");
        assert_eq!(title_from_name("quickstart_java"), "Quickstart Java");
    }

    #[test]
    fn test_sidebar_title_prefers_label() {
        let mut doc = parse_document(Path::new("a.md"), "# Long Title", &DocumentOptions::default())
            .unwrap()
            .document;
        assert_eq!(doc.sidebar_title(), "Long Title");

        doc.sidebar_label = Some("Short".to_owned());
        assert_eq!(doc.sidebar_title(), "Short");
    }
}
