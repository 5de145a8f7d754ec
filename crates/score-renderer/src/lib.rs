//! HTML rendering for Score.
//!
//! - [`render_nodes`] turns a content tree into an HTML fragment
//! - [`PageRenderer`] wraps a document in the full page shell: header,
//!   sidebar, table of contents, edit link and pagination
//! - [`LandingPage`] renders the site's front page
//! - [`render_load_error`] renders the retry page for chunk load failures and
//!   [`render_not_found`] the page for unknown paths
//!
//! Rendering never fails. Content nodes of an unknown kind are skipped and
//! reported through [`RenderedContent::errors`].

mod error;
mod error_page;
mod html;
mod landing;
mod page;
mod shell;
mod util;

pub use error::RenderError;
pub use error_page::{render_load_error, render_not_found};
pub use html::{RenderedContent, render_nodes};
pub use landing::{DEFAULT_LOGO, LandingPage, default_features};
pub use page::{PageContext, PageRenderer};
pub use util::escape_html;
