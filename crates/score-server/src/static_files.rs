//! Static file serving.
//!
//! Files under the base URL are looked up in the static directory first and
//! then in the build output, which holds `chunks/` and `manifest.json`.

use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Serve a file for `path`, or `None` if no file matches.
pub(crate) async fn serve(state: &AppState, path: &str) -> Option<Response> {
    let relative = asset_path(&state.manifest.public_path, path)?;

    for root in [&state.static_dir, &state.output_dir] {
        // Directories and missing files both fail to read.
        if let Ok(bytes) = tokio::fs::read(root.join(relative)).await {
            return Some(file_response(relative, bytes));
        }
    }
    None
}

/// Path relative to the base URL, rejecting anything that could leave the root.
fn asset_path<'a>(base_url: &str, path: &'a str) -> Option<&'a str> {
    let relative = path.strip_prefix(base_url)?;
    let valid = !relative.is_empty()
        && !relative.contains('\\')
        && relative
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
    valid.then_some(relative)
}

fn file_response(relative: &str, bytes: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(relative).first_or_octet_stream();
    let cache_control = if relative.starts_with("chunks/") {
        // File names carry a content hash.
        "public, max-age=31536000, immutable"
    } else {
        "no-cache"
    };

    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CACHE_CONTROL, cache_control.to_owned()),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_path_strips_base_url() {
        assert_eq!(
            asset_path("/SymphonyQL/", "/SymphonyQL/img/logo.png"),
            Some("img/logo.png")
        );
        assert_eq!(asset_path("/", "/chunks/a.json"), Some("chunks/a.json"));
    }

    #[test]
    fn test_asset_path_rejects_traversal_and_foreign_paths() {
        assert_eq!(asset_path("/", "/../secret"), None);
        assert_eq!(asset_path("/", "/img/./logo.png"), None);
        assert_eq!(asset_path("/", "/img//logo.png"), None);
        assert_eq!(asset_path("/", "/img\\logo.png"), None);
        assert_eq!(asset_path("/SymphonyQL/", "/other/logo.png"), None);
        assert_eq!(asset_path("/SymphonyQL/", "/SymphonyQL/"), None);
    }

    #[test]
    fn test_chunk_files_are_immutable() {
        let response = file_response("chunks/1a2b3c4d.5e6f7a8b.json", b"{}".to_vec());

        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=31536000, immutable"
        );
    }
}
