//! Route definitions for the dictionary.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dictionary;
use crate::state::AppState;

/// Routes mounted at `/dictionary`.
///
/// ```text
/// GET    /                  -> list_entries (optional ?search=)
/// POST   /{id}/practice     -> record_practice
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dictionary::list_entries))
        .route("/{id}/practice", post(dictionary::record_practice))
}
