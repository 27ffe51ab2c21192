//! Streak record models.

use chrono::NaiveDate;
use serde::Serialize;
use signquest_core::types::DbId;
use sqlx::FromRow;

/// A row from the `login_streaks` table (one per user).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LoginStreak {
    pub id: DbId,
    pub user_id: DbId,
    pub current_streak: i32,
    pub last_login_date: Option<NaiveDate>,
}

/// A row from the `level_streaks` table (one per user): the
/// consecutive-day correct-answer streak.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LevelStreak {
    pub id: DbId,
    pub user_id: DbId,
    pub current_streak: i32,
    pub last_answer_date: Option<NaiveDate>,
}
