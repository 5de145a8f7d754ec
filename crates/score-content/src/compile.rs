//! Markdown to content tree compiler.
//!
//! Walks `pulldown-cmark` events with an explicit frame stack: every start tag
//! pushes exactly one frame and every end tag pops one, so end tags never need
//! to be inspected. Constructs outside the closed node set are either spliced
//! into their parent ([`Frame::Transparent`]) or dropped ([`Frame::Discard`])
//! with a warning.

use std::collections::HashMap;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use crate::node::{Alignment, ContentNode, TableCell, TocEntry};

/// Result of compiling one markdown document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompiledDocument {
    /// Raw YAML front matter, if the document starts with a `---` block.
    pub front_matter: Option<String>,
    /// Text of the first H1 heading.
    pub title: Option<String>,
    /// Table of contents (H2 and deeper).
    pub toc: Vec<TocEntry>,
    /// Content tree.
    pub nodes: Vec<ContentNode>,
    /// Constructs that were dropped during compilation.
    pub warnings: Vec<String>,
}

impl CompiledDocument {
    /// Plain text of the first top-level paragraph.
    #[must_use]
    pub fn first_paragraph_text(&self) -> Option<String> {
        self.nodes.iter().find_map(|node| match node {
            ContentNode::Paragraph { .. } => {
                let text = node.plain_text();
                let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
                (!text.is_empty()).then_some(text)
            }
            _ => None,
        })
    }
}

/// Compile markdown (with optional YAML front matter) into a content tree.
#[must_use]
pub fn compile(markdown: &str) -> CompiledDocument {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS;

    let mut compiler = Compiler::default();
    for event in Parser::new_ext(markdown, options) {
        compiler.event(event);
    }
    compiler.finish()
}

enum Frame {
    Paragraph(Vec<ContentNode>),
    Heading {
        level: u8,
        children: Vec<ContentNode>,
    },
    Blockquote(Vec<ContentNode>),
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    List {
        ordered: bool,
        start: Option<u64>,
        items: Vec<Vec<ContentNode>>,
    },
    Item(Vec<ContentNode>),
    Table {
        alignments: Vec<Alignment>,
        head: Vec<TableCell>,
        rows: Vec<Vec<TableCell>>,
    },
    Head(Vec<TableCell>),
    Row(Vec<TableCell>),
    Cell(Vec<ContentNode>),
    Emphasis(Vec<ContentNode>),
    Strong(Vec<ContentNode>),
    Strikethrough(Vec<ContentNode>),
    Link {
        href: String,
        title: Option<String>,
        children: Vec<ContentNode>,
    },
    /// Unsupported container whose children are kept.
    Transparent(Vec<ContentNode>),
    /// Unsupported container whose content is dropped.
    Discard,
    Metadata(String),
}

impl Frame {
    fn children_mut(&mut self) -> Option<&mut Vec<ContentNode>> {
        match self {
            Self::Paragraph(children)
            | Self::Heading { children, .. }
            | Self::Blockquote(children)
            | Self::Item(children)
            | Self::Cell(children)
            | Self::Emphasis(children)
            | Self::Strong(children)
            | Self::Strikethrough(children)
            | Self::Link { children, .. }
            | Self::Transparent(children) => Some(children),
            Self::CodeBlock { .. }
            | Self::List { .. }
            | Self::Table { .. }
            | Self::Head(_)
            | Self::Row(_)
            | Self::Discard
            | Self::Metadata(_) => None,
        }
    }
}

#[derive(Default)]
struct Compiler {
    stack: Vec<Frame>,
    nodes: Vec<ContentNode>,
    front_matter: Option<String>,
    title: Option<String>,
    toc: Vec<TocEntry>,
    id_counts: HashMap<String, usize>,
    warnings: Vec<String>,
}

impl Compiler {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.push_node(ContentNode::InlineCode {
                code: code.into_string(),
            }),
            Event::InlineMath(math) => self.push_node(ContentNode::InlineCode {
                code: math.into_string(),
            }),
            Event::DisplayMath(math) => self.push_node(ContentNode::CodeBlock {
                language: Some("math".to_owned()),
                code: math.into_string(),
            }),
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.push_node(ContentNode::LineBreak),
            Event::Rule => self.push_node(ContentNode::Rule),
            Event::TaskListMarker(checked) => {
                self.text(if checked { "[x] " } else { "[ ] " });
            }
            Event::Html(_) | Event::InlineHtml(_) => {
                if !matches!(self.stack.last(), Some(Frame::Discard)) {
                    self.warnings.push("raw HTML is not supported and was skipped".to_owned());
                }
            }
            Event::FootnoteReference(name) => {
                self.warnings
                    .push(format!("footnote reference [^{name}] was skipped"));
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph(Vec::new()),
            Tag::Heading { level, .. } => Frame::Heading {
                level: heading_level_to_num(level),
                children: Vec::new(),
            },
            Tag::BlockQuote(_) => Frame::Blockquote(Vec::new()),
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .filter(|lang| !lang.is_empty())
                        .map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                Frame::CodeBlock {
                    language,
                    code: String::new(),
                }
            }
            Tag::List(start) => Frame::List {
                ordered: start.is_some(),
                start,
                items: Vec::new(),
            },
            Tag::Item => Frame::Item(Vec::new()),
            Tag::Table(alignments) => Frame::Table {
                alignments: alignments.into_iter().map(convert_alignment).collect(),
                head: Vec::new(),
                rows: Vec::new(),
            },
            Tag::TableHead => Frame::Head(Vec::new()),
            Tag::TableRow => Frame::Row(Vec::new()),
            Tag::TableCell => Frame::Cell(Vec::new()),
            Tag::Emphasis => Frame::Emphasis(Vec::new()),
            Tag::Strong => Frame::Strong(Vec::new()),
            Tag::Strikethrough => Frame::Strikethrough(Vec::new()),
            Tag::Link {
                dest_url, title, ..
            } => Frame::Link {
                href: dest_url.into_string(),
                title: (!title.is_empty()).then(|| title.into_string()),
                children: Vec::new(),
            },
            Tag::MetadataBlock(_) => Frame::Metadata(String::new()),
            Tag::Image { dest_url, .. } => {
                self.warnings
                    .push(format!("image {dest_url} is not supported and was skipped"));
                Frame::Discard
            }
            Tag::HtmlBlock => {
                self.warnings
                    .push("raw HTML block is not supported and was skipped".to_owned());
                Frame::Discard
            }
            Tag::FootnoteDefinition(_) => Frame::Discard,
            Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Superscript
            | Tag::Subscript => Frame::Transparent(Vec::new()),
        };
        self.stack.push(frame);
    }

    fn end(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };

        match frame {
            Frame::Paragraph(children) => self.push_node(ContentNode::Paragraph { children }),
            Frame::Heading { level, children } => self.finish_heading(level, children),
            Frame::Blockquote(children) => self.push_node(ContentNode::Blockquote { children }),
            Frame::CodeBlock { language, code } => {
                self.push_node(ContentNode::CodeBlock { language, code });
            }
            Frame::List {
                ordered,
                start,
                items,
            } => self.push_node(ContentNode::List {
                ordered,
                start,
                items,
            }),
            Frame::Item(children) => {
                if let Some(Frame::List { items, .. }) = self.stack.last_mut() {
                    items.push(children);
                }
            }
            Frame::Table {
                alignments,
                head,
                rows,
            } => self.push_node(ContentNode::Table {
                alignments,
                head,
                rows,
            }),
            Frame::Head(cells) => {
                if let Some(Frame::Table { head, .. }) = self.stack.last_mut() {
                    *head = cells;
                }
            }
            Frame::Row(cells) => {
                if let Some(Frame::Table { rows, .. }) = self.stack.last_mut() {
                    rows.push(cells);
                }
            }
            Frame::Cell(children) => {
                if let Some(Frame::Head(cells) | Frame::Row(cells)) = self.stack.last_mut() {
                    cells.push(TableCell { children });
                }
            }
            Frame::Emphasis(children) => self.push_node(ContentNode::Emphasis { children }),
            Frame::Strong(children) => self.push_node(ContentNode::Strong { children }),
            Frame::Strikethrough(children) => {
                self.push_node(ContentNode::Strikethrough { children });
            }
            Frame::Link {
                href,
                title,
                children,
            } => self.push_node(ContentNode::Link {
                href,
                title,
                children,
            }),
            Frame::Transparent(children) => {
                for child in children {
                    self.push_node(child);
                }
            }
            Frame::Discard => {}
            Frame::Metadata(yaml) => self.front_matter = Some(yaml),
        }
    }

    fn text(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some(Frame::CodeBlock { code, .. }) => {
                code.push_str(text);
                return;
            }
            Some(Frame::Metadata(yaml)) => {
                yaml.push_str(text);
                return;
            }
            Some(Frame::Discard) => return,
            _ => {}
        }

        // Merge with a preceding text node so soft breaks don't fragment runs
        if let Some(ContentNode::Text { text: previous }) =
            self.current_children().and_then(|c| c.last_mut())
        {
            previous.push_str(text);
        } else {
            self.push_node(ContentNode::text(text));
        }
    }

    fn current_children(&mut self) -> Option<&mut Vec<ContentNode>> {
        match self.stack.last_mut() {
            Some(frame) => frame.children_mut(),
            None => Some(&mut self.nodes),
        }
    }

    fn push_node(&mut self, node: ContentNode) {
        if let Some(children) = self.current_children() {
            children.push(node);
        }
    }

    fn finish_heading(&mut self, level: u8, children: Vec<ContentNode>) {
        let text: String = children.iter().map(ContentNode::plain_text).collect();
        let text = text.trim().to_owned();
        let id = self.generate_id(&text);

        if level == 1 && self.title.is_none() {
            self.title = Some(text);
        } else if level > 1 {
            self.toc.push(TocEntry {
                level,
                title: text,
                id: id.clone(),
            });
        }

        self.push_node(ContentNode::Heading {
            level,
            id,
            children,
        });
    }

    /// Generate a unique anchor ID for a heading.
    fn generate_id(&mut self, text: &str) -> String {
        let base_id = slugify(text);
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }

    fn finish(mut self) -> CompiledDocument {
        // Unbalanced streams should not happen, but never lose content
        while !self.stack.is_empty() {
            self.end();
        }

        CompiledDocument {
            front_matter: self.front_matter,
            title: self.title,
            toc: self.toc,
            nodes: self.nodes,
            warnings: self.warnings,
        }
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn convert_alignment(alignment: pulldown_cmark::Alignment) -> Alignment {
    match alignment {
        pulldown_cmark::Alignment::None => Alignment::None,
        pulldown_cmark::Alignment::Left => Alignment::Left,
        pulldown_cmark::Alignment::Center => Alignment::Center,
        pulldown_cmark::Alignment::Right => Alignment::Right,
    }
}

/// Convert text to URL-safe slug.
///
/// Converts to lowercase, replaces whitespace/dashes/underscores with single dashes,
/// and removes other non-alphanumeric characters.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true;

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}
