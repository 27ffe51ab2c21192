//! Route definitions for scheduled-job triggers.

use axum::routing::post;
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// POST   /daily-reset    -> daily_reset (shared secret)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/daily-reset", post(jobs::daily_reset))
}
