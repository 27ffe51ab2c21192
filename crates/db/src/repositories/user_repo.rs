//! Repository for the `users` table.

use signquest_core::types::DbId;
use sqlx::PgPool;

use crate::models::leaderboard::LeaderboardRow;
use crate::models::user::{CreateUser, User};

/// Column list for `users` queries.
const USER_COLUMNS: &str = "id, username, email, points, xp, \
     badge1, badge2, badge3, badge4, \
     longest_quiz_streak, profile_photo, created_at, updated_at";

/// Provides CRUD operations and reward mutations for user records.
pub struct UserRepo;

impl UserRepo {
    /// Fetch a user by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a user record.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, profile_photo) \
             VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.profile_photo)
            .fetch_one(pool)
            .await
    }

    /// Grant points and XP to a user. Both totals only ever increase.
    pub async fn grant_rewards(
        pool: &PgPool,
        id: DbId,
        points: i32,
        xp: i32,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "UPDATE users SET points = points + $2, xp = xp + $3 \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(points)
            .bind(xp)
            .fetch_one(pool)
            .await
    }

    /// Set one of the four badge flags.
    pub async fn set_badge(pool: &PgPool, id: DbId, badge: i16) -> Result<User, sqlx::Error> {
        // Column name from a checked set; badge is never interpolated raw.
        let column = match badge {
            1 => "badge1",
            2 => "badge2",
            3 => "badge3",
            4 => "badge4",
            _ => {
                return Err(sqlx::Error::Protocol(format!(
                    "badge index out of range: {badge}"
                )))
            }
        };
        let query =
            format!("UPDATE users SET {column} = TRUE WHERE id = $1 RETURNING {USER_COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Raise `longest_quiz_streak` to `streak` if it exceeds the stored value.
    pub async fn bump_longest_streak(
        pool: &PgPool,
        id: DbId,
        streak: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET longest_quiz_streak = GREATEST(longest_quiz_streak, $2) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(streak)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// All users in leaderboard order: `points` DESC, ties broken by
    /// `xp` DESC and then `id` ASC.
    pub async fn list_ranked(pool: &PgPool) -> Result<Vec<LeaderboardRow>, sqlx::Error> {
        sqlx::query_as::<_, LeaderboardRow>(
            "SELECT id, username, points, xp, profile_photo FROM users \
             ORDER BY points DESC, xp DESC, id ASC",
        )
        .fetch_all(pool)
        .await
    }
}
