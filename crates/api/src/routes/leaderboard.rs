//! Route definitions for the leaderboard.

use axum::routing::get;
use axum::Router;

use crate::handlers::leaderboard;
use crate::state::AppState;

/// Routes mounted at `/leaderboard`.
///
/// ```text
/// GET    /        -> list_ranked
/// GET    /me      -> my_rank
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leaderboard::list_ranked))
        .route("/me", get(leaderboard::my_rank))
}
