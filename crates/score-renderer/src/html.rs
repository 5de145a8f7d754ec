//! Content tree to HTML.
//!
//! Every known node kind has a fixed HTML form. Unknown nodes render nothing
//! and are reported as [`RenderError::UnknownNode`].

use std::fmt::Write;

use score_content::{Alignment, ContentNode, TableCell};

use crate::RenderError;
use crate::util::escape_html;

/// Output of [`render_nodes`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedContent {
    /// Rendered HTML fragment.
    pub html: String,
    /// Nodes that were skipped.
    pub errors: Vec<RenderError>,
}

/// Render a content tree to an HTML fragment.
///
/// # Example
///
/// ```
/// use score_content::ContentNode;
/// use score_renderer::render_nodes;
///
/// let nodes = vec![ContentNode::Paragraph {
///     children: vec![ContentNode::text("Hello")],
/// }];
///
/// assert_eq!(render_nodes(&nodes).html, "<p>Hello</p>");
/// ```
#[must_use]
pub fn render_nodes(nodes: &[ContentNode]) -> RenderedContent {
    let mut writer = HtmlWriter::default();
    writer.nodes(nodes);

    for error in &writer.errors {
        tracing::warn!(error = %error, "Skipped content node");
    }

    RenderedContent {
        html: writer.out,
        errors: writer.errors,
    }
}

#[derive(Default)]
struct HtmlWriter {
    out: String,
    errors: Vec<RenderError>,
    /// Index path of the node being written.
    position: Vec<usize>,
}

impl HtmlWriter {
    fn nodes(&mut self, nodes: &[ContentNode]) {
        for (idx, node) in nodes.iter().enumerate() {
            self.position.push(idx);
            self.node(node);
            self.position.pop();
        }
    }

    fn wrapped(&mut self, open: &str, children: &[ContentNode], close: &str) {
        self.out.push_str(open);
        self.nodes(children);
        self.out.push_str(close);
    }

    fn node(&mut self, node: &ContentNode) {
        match node {
            ContentNode::Heading {
                level,
                id,
                children,
            } => {
                let level = (*level).clamp(1, 6);
                let _ = write!(self.out, r#"<h{level} id="{}">"#, escape_html(id));
                self.nodes(children);
                let _ = write!(self.out, "</h{level}>");
            }
            ContentNode::Paragraph { children } => self.wrapped("<p>", children, "</p>"),
            ContentNode::CodeBlock { language, code } => self.code_block(language.as_deref(), code),
            ContentNode::Table {
                alignments,
                head,
                rows,
            } => self.table(alignments, head, rows),
            ContentNode::InlineCode { code } => {
                let _ = write!(self.out, "<code>{}</code>", escape_html(code));
            }
            ContentNode::Link {
                href,
                title,
                children,
            } => {
                let _ = write!(self.out, r#"<a href="{}""#, escape_html(href));
                if let Some(title) = title {
                    let _ = write!(self.out, r#" title="{}""#, escape_html(title));
                }
                self.wrapped(">", children, "</a>");
            }
            ContentNode::Text { text } => self.out.push_str(&escape_html(text)),
            ContentNode::Strong { children } => {
                self.wrapped("<strong>", children, "</strong>");
            }
            ContentNode::Emphasis { children } => self.wrapped("<em>", children, "</em>"),
            ContentNode::Strikethrough { children } => self.wrapped("<del>", children, "</del>"),
            ContentNode::List {
                ordered,
                start,
                items,
            } => self.list(*ordered, *start, items),
            ContentNode::Blockquote { children } => {
                self.wrapped("<blockquote>", children, "</blockquote>");
            }
            ContentNode::LineBreak => self.out.push_str("<br>"),
            ContentNode::Rule => self.out.push_str("<hr>"),
            ContentNode::Unknown => {
                let path = self
                    .position
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(".");
                self.errors.push(RenderError::UnknownNode { path });
            }
        }
    }

    fn code_block(&mut self, language: Option<&str>, code: &str) {
        if let Some(language) = language {
            let _ = write!(
                self.out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(language),
                escape_html(code)
            );
        } else {
            let _ = write!(self.out, "<pre><code>{}</code></pre>", escape_html(code));
        }
    }

    fn list(&mut self, ordered: bool, start: Option<u64>, items: &[Vec<ContentNode>]) {
        let close = if ordered {
            match start {
                Some(n) if n != 1 => {
                    let _ = write!(self.out, r#"<ol start="{n}">"#);
                }
                _ => self.out.push_str("<ol>"),
            }
            "</ol>"
        } else {
            self.out.push_str("<ul>");
            "</ul>"
        };

        for (idx, item) in items.iter().enumerate() {
            self.position.push(idx);
            self.wrapped("<li>", item, "</li>");
            self.position.pop();
        }
        self.out.push_str(close);
    }

    fn table(&mut self, alignments: &[Alignment], head: &[TableCell], rows: &[Vec<TableCell>]) {
        self.out.push_str("<table><thead><tr>");
        self.cells("th", alignments, head);
        self.out.push_str("</tr></thead>");

        if !rows.is_empty() {
            self.out.push_str("<tbody>");
            for (idx, row) in rows.iter().enumerate() {
                self.position.push(idx);
                self.out.push_str("<tr>");
                self.cells("td", alignments, row);
                self.out.push_str("</tr>");
                self.position.pop();
            }
            self.out.push_str("</tbody>");
        }
        self.out.push_str("</table>");
    }

    fn cells(&mut self, tag: &str, alignments: &[Alignment], cells: &[TableCell]) {
        for (idx, cell) in cells.iter().enumerate() {
            let style = match alignments.get(idx) {
                Some(Alignment::Left) => r#" style="text-align:left""#,
                Some(Alignment::Center) => r#" style="text-align:center""#,
                Some(Alignment::Right) => r#" style="text-align:right""#,
                Some(Alignment::None) | None => "",
            };
            self.position.push(idx);
            let _ = write!(self.out, "<{tag}{style}>");
            self.nodes(&cell.children);
            let _ = write!(self.out, "</{tag}>");
            self.position.pop();
        }
    }
}
