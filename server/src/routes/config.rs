//! `GET /api/config`: where the browser finds the hosted backend.

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use frontdesk::BackendConfig;

use crate::state::AppState;

/// Backend URL and public anon key. Never cached, so a redeploy with new
/// settings takes effect on the next page load.
pub async fn backend_config(State(state): State<AppState>) -> impl IntoResponse {
    let config: BackendConfig = state.backend.as_ref().clone();
    ([(header::CACHE_CONTROL, "no-store")], Json(config))
}
