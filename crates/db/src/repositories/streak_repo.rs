//! Repository for the `login_streaks` and `level_streaks` tables.
//!
//! The advance write is guarded on "not already advanced today", so a
//! duplicate same-day request becomes a no-op rather than a double count.

use signquest_core::types::DbId;
use sqlx::PgPool;

use crate::models::streak::{LevelStreak, LoginStreak};

/// Column list for `login_streaks` queries.
const LOGIN_COLUMNS: &str = "id, user_id, current_streak, last_login_date";

/// Column list for `level_streaks` queries.
const LEVEL_COLUMNS: &str = "id, user_id, current_streak, last_answer_date";

/// Provides read/advance operations for both streak tables.
pub struct StreakRepo;

impl StreakRepo {
    /// Fetch the user's login streak, creating an empty record when absent.
    pub async fn get_or_create_login(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<LoginStreak, sqlx::Error> {
        let query = format!(
            "INSERT INTO login_streaks (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = login_streaks.user_id \
             RETURNING {LOGIN_COLUMNS}"
        );
        sqlx::query_as::<_, LoginStreak>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Advance the login streak to `new_streak` for today. Returns `false`
    /// when another request already advanced it today.
    pub async fn advance_login(
        pool: &PgPool,
        user_id: DbId,
        new_streak: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE login_streaks \
             SET current_streak = $2, last_login_date = CURRENT_DATE \
             WHERE user_id = $1 \
               AND last_login_date IS DISTINCT FROM CURRENT_DATE",
        )
        .bind(user_id)
        .bind(new_streak)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Fetch the user's answer streak, creating an empty record when absent.
    pub async fn get_or_create_level(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<LevelStreak, sqlx::Error> {
        let query = format!(
            "INSERT INTO level_streaks (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = level_streaks.user_id \
             RETURNING {LEVEL_COLUMNS}"
        );
        sqlx::query_as::<_, LevelStreak>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Advance the answer streak to `new_streak` for today. Returns `false`
    /// when another request already advanced it today.
    pub async fn advance_level(
        pool: &PgPool,
        user_id: DbId,
        new_streak: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE level_streaks \
             SET current_streak = $2, last_answer_date = CURRENT_DATE \
             WHERE user_id = $1 \
               AND last_answer_date IS DISTINCT FROM CURRENT_DATE",
        )
        .bind(user_id)
        .bind(new_streak)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
