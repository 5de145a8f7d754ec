//! Navigation assembly and bundle emission for Score.
//!
//! - [`build_sidebar`] turns the Content Registry into a [`Sidebar`] tree
//! - [`Sidebar::prev_next`] derives reading-order neighbours
//! - [`Site`] pairs a registry with its sidebar
//! - [`emit_bundle`] writes the chunk files and [`SiteManifest`] consumed by
//!   the module loader at serve time
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//! use score_content::Document;
//! use score_site::build_sidebar;
//!
//! let doc = Document {
//!     id: "intro".to_owned(),
//!     title: "Introduction".to_owned(),
//!     description: None,
//!     slug: "/".to_owned(),
//!     permalink: "/docs/".to_owned(),
//!     sidebar_label: None,
//!     sidebar_position: Some(1),
//!     category: None,
//!     source: PathBuf::from("intro.md"),
//!     edit_url: None,
//! };
//!
//! let sidebar = build_sidebar(&[doc], &[]);
//! assert_eq!(sidebar.links()[0].href, "/docs/");
//! ```

mod bundle;
mod error;
mod manifest;
mod sidebar;
mod site;

pub use bundle::{BundleOptions, CHUNKS_DIR, DocSummary, emit_bundle};
pub use error::BundleError;
pub use manifest::{
    MANIFEST_FILENAME, MANIFEST_VERSION, NAVIGATION_CHUNK, NAVIGATION_MODULE, Route,
    SiteManifest, content_module, metadata_module,
};
pub use sidebar::{NavLink, PrevNext, Sidebar, SidebarEntry, build_sidebar};
pub use site::Site;
