//! Handlers for the leaderboard.
//!
//! Both endpoints serve from the process-wide TTL cache; they never fail
//! on a store error (the previous snapshot, or an empty list, is returned
//! instead).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::identity::RequireUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/leaderboard
///
/// All users ranked by points (ties: XP, then id).
pub async fn list_ranked(
    RequireUser(_user_id): RequireUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let ranked = state.leaderboard.ranked(&state.pool).await;
    Ok(Json(DataResponse {
        data: ranked.as_ref().clone(),
    }))
}

/// GET /api/v1/leaderboard/me
///
/// The caller's leaderboard entry, or `null` when absent.
pub async fn my_rank(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let entry = state.leaderboard.rank_of(&state.pool, user_id).await;
    Ok(Json(DataResponse { data: entry }))
}
