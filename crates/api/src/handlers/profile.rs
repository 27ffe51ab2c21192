//! Handler for the authenticated user's profile.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use signquest_core::error::CoreError;

use signquest_db::models::streak::{LevelStreak, LoginStreak};
use signquest_db::models::user::User;
use signquest_db::repositories::{StreakRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::identity::RequireUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// The caller's gameplay profile.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub user: User,
    pub login_streak: LoginStreak,
    pub answer_streak: LevelStreak,
}

/// GET /api/v1/profile
///
/// The authenticated user's points, XP, badges, and streaks.
pub async fn get_profile(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::get(&state.pool, user_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "user",
            key: user_id.to_string(),
        })?;

    let login_streak = StreakRepo::get_or_create_login(&state.pool, user_id).await?;
    let answer_streak = StreakRepo::get_or_create_level(&state.pool, user_id).await?;

    Ok(Json(DataResponse {
        data: ProfileView {
            user,
            login_streak,
            answer_streak,
        },
    }))
}
