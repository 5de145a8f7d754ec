//! Navigation API endpoint.
//!
//! Returns the sidebar tree and the document list from the navigation module.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use score_site::{DocSummary, Sidebar};
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/navigation.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    /// Sidebar tree.
    items: Sidebar,
    /// Every document in registry order.
    docs: Vec<DocSummary>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NavigationResponse>, ServerError> {
    let navigation = &state.manifest.navigation;
    state.loader.ensure_chunks(&navigation.chunks).await?;
    let exports = state.loader.require_async(&navigation.module).await?;

    Ok(Json(NavigationResponse {
        items: exports.decode("sidebar")?,
        docs: exports.decode("docs")?,
    }))
}

#[cfg(test)]
mod tests {
    use score_site::SidebarEntry;

    use super::*;

    #[test]
    fn test_navigation_response_serialization() {
        let response = NavigationResponse {
            items: Sidebar::new(vec![SidebarEntry::Link {
                label: "Introduction".to_owned(),
                href: "/docs/".to_owned(),
                doc_id: "intro".to_owned(),
            }]),
            docs: vec![DocSummary {
                id: "intro".to_owned(),
                title: "Introduction".to_owned(),
                permalink: "/docs/".to_owned(),
            }],
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["items"][0]["type"], "link");
        assert_eq!(json["items"][0]["docId"], "intro");
        assert_eq!(json["docs"][0]["permalink"], "/docs/");
    }
}
