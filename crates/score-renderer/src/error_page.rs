use std::fmt::Write;

use score_loader::{ChunkFailure, ChunkLoadError};

use crate::shell::bare;
use crate::util::escape_html;

/// Render the page shown when a page's chunks could not be loaded.
///
/// The page names the failure and links to `retry_href`; following the link
/// starts a fresh load attempt.
#[must_use]
pub fn render_load_error(error: &ChunkLoadError, retry_href: &str) -> String {
    let message = match error.reason {
        ChunkFailure::Network => "The content for this page could not be fetched.",
        ChunkFailure::Timeout => "Loading the content for this page timed out.",
        ChunkFailure::Missing => {
            "The content for this page is missing. The site may have been rebuilt since it was loaded."
        }
        ChunkFailure::Malformed => "The content for this page is damaged.",
        ChunkFailure::Cancelled => "The server is shutting down.",
    };

    let mut body = String::with_capacity(512);
    body.push_str(r#"<main class="error"><h1>This page failed to load</h1>"#);
    let _ = write!(
        body,
        r#"<p>{message}</p><p><code>Loading chunk {} failed ({}: {})</code></p><p><a class="button" href="{}">Try again</a></p></main>"#,
        error.chunk_id,
        error.reason,
        escape_html(&error.request),
        escape_html(retry_href)
    );

    bare("Page failed to load", &body)
}

/// Render the page shown for an unknown path.
#[must_use]
pub fn render_not_found(path: &str, home_href: &str) -> String {
    let body = format!(
        r#"<main class="error"><h1>Page not found</h1><p>Nothing is published at <code>{}</code>.</p><p><a class="button" href="{}">Back to the documentation</a></p></main>"#,
        escape_html(path),
        escape_html(home_href)
    );
    bare("Page not found", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_page_has_reason_and_retry_link() {
        let error = ChunkLoadError::new(4, ChunkFailure::Timeout, "chunks/1a2b3c4d.5e6f7a8b.json");

        let html = render_load_error(&error, "/SymphonyQL/docs/schema");

        assert!(html.contains("Loading the content for this page timed out."));
        assert!(html.contains(
            "<code>Loading chunk 4 failed (timeout: chunks/1a2b3c4d.5e6f7a8b.json)</code>"
        ));
        assert!(html.contains(r#"<a class="button" href="/SymphonyQL/docs/schema">Try again</a>"#));
    }

    #[test]
    fn test_missing_page_message() {
        let error = ChunkLoadError::new(2, ChunkFailure::Missing, "chunks/gone.json");

        let html = render_load_error(&error, "/docs/");

        assert!(html.contains("The site may have been rebuilt"));
        assert!(html.contains("(missing: chunks/gone.json)"));
    }

    #[test]
    fn test_not_found_page_escapes_path() {
        let html = render_not_found("/docs/<x>", "/docs/");

        assert!(html.contains("<code>/docs/&lt;x&gt;</code>"));
        assert!(html.contains(r#"<a class="button" href="/docs/">Back to the documentation</a>"#));
    }
}
