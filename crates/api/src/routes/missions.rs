//! Route definitions for missions.
//!
//! All endpoints require the gateway identity header.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::missions;
use crate::state::AppState;

/// Routes mounted at `/missions`.
///
/// ```text
/// GET    /                      -> list_missions
/// POST   /login                 -> login
/// GET    /daily                 -> list_daily_missions
/// POST   /daily/{name}/touch    -> touch_daily
/// POST   /daily/{id}/claim      -> claim_daily
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(missions::list_missions))
        .route("/login", post(missions::login))
        .route("/daily", get(missions::list_daily_missions))
        .route("/daily/{name}/touch", post(missions::touch_daily))
        .route("/daily/{id}/claim", post(missions::claim_daily))
}
