//! Router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let base_url = state.manifest.public_path.clone();

    let mut router = Router::new()
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .route("/api/pages/{*permalink}", get(handlers::pages::get_page))
        .route(&base_url, get(handlers::landing::get_landing));

    // `/SymphonyQL` as well as `/SymphonyQL/`
    let trimmed = base_url.trim_end_matches('/');
    if !trimmed.is_empty() {
        router = router.route(trimmed, get(handlers::landing::get_landing));
    }

    router
        .fallback(handlers::fallback)
        .layer(
            ServiceBuilder::new()
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
