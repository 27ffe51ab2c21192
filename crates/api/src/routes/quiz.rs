//! Route definitions for quiz levels, answers, and clear rewards.
//!
//! All endpoints require the gateway identity header.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::quiz;
use crate::state::AppState;

/// Routes mounted at `/quiz`.
///
/// ```text
/// GET    /levels                             -> list_levels
/// GET    /levels/{id}                        -> get_level
/// POST   /levels/{id}/claim                  -> claim_level_clear
/// POST   /levels/{id}/stages/{stage}/claim   -> claim_stage_clear
/// POST   /answers                            -> submit_answer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/levels", get(quiz::list_levels))
        .route("/levels/{id}", get(quiz::get_level))
        .route("/levels/{id}/claim", post(quiz::claim_level_clear))
        .route(
            "/levels/{id}/stages/{stage}/claim",
            post(quiz::claim_stage_clear),
        )
        .route("/answers", post(quiz::submit_answer))
}
