//! Content Registry for Score.
//!
//! Markdown sources with YAML front matter are compiled at build time into
//! [`Document`] metadata plus a [`ContentNode`] tree. The registry is the only
//! place markdown is parsed; everything downstream consumes the tree.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use score_content::{ContentRegistry, DocumentOptions, parse_document};
//!
//! let parsed = parse_document(
//!     Path::new("intro.md"),
//!     "# Introduction\n\nSymphonyQL is a GraphQL implementation.",
//!     &DocumentOptions::default(),
//! )
//! .unwrap();
//!
//! let mut registry = ContentRegistry::new();
//! registry.insert(parsed.document, parsed.content).unwrap();
//!
//! assert_eq!(registry.get("intro").unwrap().permalink, "/docs/intro");
//! ```

mod compile;
mod document;
mod error;
mod front_matter;
mod node;
mod registry;
mod source;

pub use compile::{CompiledDocument, compile, slugify};
pub use document::{Document, DocumentContent, DocumentOptions, ParsedDocument, parse_document};
pub use error::ContentError;
pub use front_matter::FrontMatter;
pub use node::{Alignment, ContentNode, TableCell, TocEntry};
pub use registry::ContentRegistry;
pub use source::load_dir;
