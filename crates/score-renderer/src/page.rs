//! Documentation page shell.
//!
//! A page is the site header, the sidebar with the active document
//! highlighted, the rendered content, the table of contents, an optional
//! edit link and previous/next pagination.

use std::fmt::Write;

use score_content::{ContentNode, Document, TocEntry};
use score_site::{NavLink, Sidebar, SidebarEntry};

use crate::html::render_nodes;
use crate::shell::Shell;
use crate::util::escape_html;

/// Everything needed to render one documentation page.
#[derive(Clone, Copy, Debug)]
pub struct PageContext<'a> {
    /// Document metadata.
    pub document: &'a Document,
    /// Content tree.
    pub nodes: &'a [ContentNode],
    /// Table of contents.
    pub toc: &'a [TocEntry],
    /// Site sidebar.
    pub sidebar: &'a Sidebar,
    /// Previous document in reading order.
    pub previous: Option<&'a NavLink>,
    /// Next document in reading order.
    pub next: Option<&'a NavLink>,
}

/// Renders documentation pages for one site.
#[derive(Clone, Debug)]
pub struct PageRenderer {
    site_title: String,
    base_url: String,
    docs_root: String,
}

impl PageRenderer {
    /// Create a renderer.
    ///
    /// `docs_root` is the permalink prefix of the documentation, e.g.
    /// `/SymphonyQL/docs/`.
    #[must_use]
    pub fn new(
        site_title: impl Into<String>,
        base_url: impl Into<String>,
        docs_root: impl Into<String>,
    ) -> Self {
        Self {
            site_title: site_title.into(),
            base_url: base_url.into(),
            docs_root: docs_root.into(),
        }
    }

    /// Site title.
    #[must_use]
    pub fn site_title(&self) -> &str {
        &self.site_title
    }

    /// Base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Documentation root URL.
    #[must_use]
    pub fn docs_root(&self) -> &str {
        &self.docs_root
    }

    /// Render a full HTML page.
    #[must_use]
    pub fn render(&self, ctx: PageContext<'_>) -> String {
        let doc = ctx.document;
        let content = render_nodes(ctx.nodes);
        if !content.errors.is_empty() {
            tracing::warn!(
                doc_id = %doc.id,
                skipped = content.errors.len(),
                "Page rendered with skipped nodes"
            );
        }

        let mut body = String::with_capacity(content.html.len() + 4096);
        body.push_str(r#"<div class="layout">"#);

        body.push_str(r#"<nav class="sidebar" aria-label="Docs sidebar"><ul class="menu">"#);
        render_entries(ctx.sidebar.entries(), &doc.id, &mut body);
        body.push_str("</ul></nav>");

        body.push_str(r#"<main class="doc"><article>"#);
        let starts_with_title = matches!(
            ctx.nodes.first(),
            Some(ContentNode::Heading { level: 1, .. })
        );
        if !starts_with_title {
            let _ = write!(body, "<h1>{}</h1>", escape_html(&doc.title));
        }
        body.push_str(&content.html);
        body.push_str("</article>");

        if let Some(edit_url) = &doc.edit_url {
            let _ = write!(
                body,
                r#"<p><a class="edit-link" href="{}" target="_blank" rel="noopener noreferrer">Edit this page</a></p>"#,
                escape_html(edit_url)
            );
        }
        render_pagination(ctx.previous, ctx.next, &mut body);
        body.push_str("</main>");

        render_toc(ctx.toc, &mut body);
        body.push_str("</div>");

        let shell = Shell {
            site_title: &self.site_title,
            base_url: &self.base_url,
            docs_root: &self.docs_root,
        };
        shell.wrap(&doc.title, doc.description.as_deref(), &body)
    }
}

fn render_entries(entries: &[SidebarEntry], active: &str, out: &mut String) {
    for entry in entries {
        match entry {
            SidebarEntry::Link {
                label,
                href,
                doc_id,
            } => {
                if doc_id == active {
                    let _ = write!(
                        out,
                        r#"<li><a class="menu__link menu__link--active" aria-current="page" href="{}">{}</a></li>"#,
                        escape_html(href),
                        escape_html(label)
                    );
                } else {
                    let _ = write!(
                        out,
                        r#"<li><a class="menu__link" href="{}">{}</a></li>"#,
                        escape_html(href),
                        escape_html(label)
                    );
                }
            }
            SidebarEntry::Category {
                label,
                items,
                collapsed,
                collapsible,
            } => {
                if *collapsible {
                    let open = !*collapsed || entry.contains_doc(active);
                    let _ = write!(
                        out,
                        r#"<li><details class="menu__category"{}><summary>{}</summary><ul>"#,
                        if open { " open" } else { "" },
                        escape_html(label)
                    );
                    render_entries(items, active, out);
                    out.push_str("</ul></details></li>");
                } else {
                    let _ = write!(
                        out,
                        r#"<li class="menu__category"><span class="menu__category-label">{}</span><ul>"#,
                        escape_html(label)
                    );
                    render_entries(items, active, out);
                    out.push_str("</ul></li>");
                }
            }
        }
    }
}

fn render_toc(toc: &[TocEntry], out: &mut String) {
    if toc.is_empty() {
        return;
    }
    out.push_str(r#"<nav class="toc" aria-label="On this page"><ul>"#);
    for entry in toc {
        let _ = write!(
            out,
            r##"<li class="toc__level-{}"><a href="#{}">{}</a></li>"##,
            entry.level,
            escape_html(&entry.id),
            escape_html(&entry.title)
        );
    }
    out.push_str("</ul></nav>");
}

fn render_pagination(previous: Option<&NavLink>, next: Option<&NavLink>, out: &mut String) {
    if previous.is_none() && next.is_none() {
        return;
    }
    out.push_str(r#"<nav class="pagination" aria-label="Docs pages">"#);
    if let Some(link) = previous {
        let _ = write!(
            out,
            r#"<a class="pagination__prev" href="{}"><span class="pagination__sublabel">Previous</span><span class="pagination__label">{}</span></a>"#,
            escape_html(&link.href),
            escape_html(&link.label)
        );
    }
    if let Some(link) = next {
        let _ = write!(
            out,
            r#"<a class="pagination__next" href="{}"><span class="pagination__sublabel">Next</span><span class="pagination__label">{}</span></a>"#,
            escape_html(&link.href),
            escape_html(&link.label)
        );
    }
    out.push_str("</nav>");
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use score_config::CategoryConfig;
    use score_site::build_sidebar;

    use super::*;

    fn doc(id: &str, title: &str, position: u32, category: &str) -> Document {
        Document {
            id: id.to_owned(),
            title: title.to_owned(),
            description: None,
            slug: format!("/{id}"),
            permalink: format!("/SymphonyQL/docs/{id}"),
            sidebar_label: None,
            sidebar_position: Some(position),
            category: Some(category.to_owned()),
            source: PathBuf::from(format!("{id}.md")),
            edit_url: None,
        }
    }

    fn docs() -> Vec<Document> {
        vec![
            doc("intro", "Introduction", 1, "Getting Started"),
            doc("quickstart-java", "Quick Start (Java)", 2, "Getting Started"),
            doc("installation", "Installation", 1, "Guides"),
        ]
    }

    fn categories(collapsible: bool) -> Vec<CategoryConfig> {
        ["Getting Started", "Guides"]
            .into_iter()
            .map(|label| CategoryConfig {
                label: label.to_owned(),
                collapsed: true,
                collapsible,
            })
            .collect()
    }

    fn renderer() -> PageRenderer {
        PageRenderer::new("SymphonyQL", "/SymphonyQL/", "/SymphonyQL/docs/")
    }

    #[test]
    fn test_sidebar_marks_active_and_opens_its_category() {
        let docs = docs();
        let sidebar = build_sidebar(&docs, &categories(true));
        let nodes = vec![ContentNode::Paragraph {
            children: vec![ContentNode::text("Install it.")],
        }];

        let html = renderer().render(PageContext {
            document: &docs[2],
            nodes: &nodes,
            toc: &[],
            sidebar: &sidebar,
            previous: None,
            next: None,
        });

        assert!(html.contains(
            r#"<a class="menu__link menu__link--active" aria-current="page" href="/SymphonyQL/docs/installation">Installation</a>"#
        ));
        assert!(html.contains(
            r#"<details class="menu__category"><summary>Getting Started</summary>"#
        ));
        assert!(html.contains(r#"<details class="menu__category" open><summary>Guides</summary>"#));
        assert!(html.contains("<h1>Installation</h1><p>Install it.</p>"));
        assert!(!html.contains("Edit this page"));
        assert!(!html.contains("pagination"));
    }

    #[test]
    fn test_non_collapsible_category_has_no_details() {
        let docs = docs();
        let sidebar = build_sidebar(&docs, &categories(false));

        let html = renderer().render(PageContext {
            document: &docs[0],
            nodes: &[],
            toc: &[],
            sidebar: &sidebar,
            previous: None,
            next: None,
        });

        assert!(!html.contains("<details"));
        assert!(html.contains(r#"<span class="menu__category-label">Guides</span>"#));
    }

    #[test]
    fn test_leading_h1_is_not_duplicated() {
        let docs = docs();
        let sidebar = build_sidebar(&docs, &[]);
        let nodes = vec![ContentNode::Heading {
            level: 1,
            id: "introduction".to_owned(),
            children: vec![ContentNode::text("Introduction")],
        }];

        let html = renderer().render(PageContext {
            document: &docs[0],
            nodes: &nodes,
            toc: &[],
            sidebar: &sidebar,
            previous: None,
            next: None,
        });

        assert_eq!(html.matches("<h1").count(), 1);
        assert!(html.contains(r#"<h1 id="introduction">Introduction</h1>"#));
    }

    #[test]
    fn test_toc_edit_link_and_pagination() {
        let mut docs = docs();
        docs[1].edit_url =
            Some("https://github.com/bitlap/SymphonyQL/edit/master/docs/quickstart-java.md".to_owned());
        docs[1].description = Some("Java setup".to_owned());
        let sidebar = build_sidebar(&docs, &categories(true));
        let nav = sidebar.prev_next("quickstart-java");
        let toc = vec![
            TocEntry {
                level: 2,
                title: "Dependencies".to_owned(),
                id: "dependencies".to_owned(),
            },
            TocEntry {
                level: 3,
                title: "Maven".to_owned(),
                id: "maven".to_owned(),
            },
        ];

        let html = renderer().render(PageContext {
            document: &docs[1],
            nodes: &[],
            toc: &toc,
            sidebar: &sidebar,
            previous: nav.previous.as_ref(),
            next: nav.next.as_ref(),
        });

        assert!(html.contains("<title>Quick Start (Java) | SymphonyQL</title>"));
        assert!(html.contains(r#"<meta name="description" content="Java setup">"#));
        assert!(html.contains(r##"<li class="toc__level-2"><a href="#dependencies">Dependencies</a></li>"##));
        assert!(html.contains(r##"<li class="toc__level-3"><a href="#maven">Maven</a></li>"##));
        assert!(html.contains(
            r#"href="https://github.com/bitlap/SymphonyQL/edit/master/docs/quickstart-java.md" target="_blank" rel="noopener noreferrer">Edit this page</a>"#
        ));
        assert!(html.contains(
            r#"<a class="pagination__prev" href="/SymphonyQL/docs/intro"><span class="pagination__sublabel">Previous</span><span class="pagination__label">Introduction</span></a>"#
        ));
        assert!(html.contains(
            r#"<a class="pagination__next" href="/SymphonyQL/docs/installation">"#
        ));
    }

    #[test]
    fn test_unknown_nodes_are_skipped() {
        let docs = docs();
        let sidebar = build_sidebar(&docs, &[]);
        let nodes = vec![
            ContentNode::Unknown,
            ContentNode::Paragraph {
                children: vec![ContentNode::text("still here")],
            },
        ];

        let html = renderer().render(PageContext {
            document: &docs[0],
            nodes: &nodes,
            toc: &[],
            sidebar: &sidebar,
            previous: None,
            next: None,
        });

        assert!(html.contains("<h1>Introduction</h1><p>still here</p>"));
    }
}
