//! Landing page.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;

/// Handle GET {base_url}.
pub(crate) async fn get_landing(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.landing.render())
}
