//! Route definitions for quotes.

use axum::routing::get;
use axum::Router;

use crate::handlers::quote;
use crate::state::AppState;

/// Routes mounted at `/quote`.
///
/// ```text
/// GET    /    -> random_quote
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(quote::random_quote))
}
