//! Handlers for long-running and daily missions.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use signquest_core::types::DbId;

use crate::engine::missions as engine;
use crate::error::AppResult;
use crate::middleware::identity::RequireUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/missions
///
/// Long-running missions with the caller's progress. Reading syncs each
/// mission from its source and applies any due level-up (with its grant).
pub async fn list_missions(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let missions = engine::mission_overview(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: missions }))
}

/// GET /api/v1/missions/daily
///
/// Daily missions with the caller's state for today.
pub async fn list_daily_missions(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let missions = engine::daily_overview(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: missions }))
}

/// POST /api/v1/missions/login
///
/// Record a login event: advances the login streak, the "Login Streak!"
/// mission, and the daily login mission (first login of the day only).
pub async fn login(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let summary = engine::login_event(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// POST /api/v1/missions/daily/{name}/touch
///
/// Record one progress event against a daily mission by name.
pub async fn touch_daily(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let view = engine::touch_daily(&state.pool, user_id, &name).await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/missions/daily/{id}/claim
///
/// Claim a completed daily mission. Fails with 409 when the mission is not
/// completed or was already claimed today; no reward is granted then.
pub async fn claim_daily(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(daily_mission_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let outcome = engine::claim_daily(&state.pool, user_id, daily_mission_id).await?;
    Ok(Json(DataResponse { data: outcome }))
}
