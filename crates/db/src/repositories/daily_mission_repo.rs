//! Repository for the `daily_mission` and `user_daily_mission_progress`
//! tables.
//!
//! The touch upsert and both claim variants are single statements, so the
//! day rollover, the progress cap, and the once-per-day claim hold under
//! concurrent duplicate requests.

use signquest_core::types::DbId;
use sqlx::PgPool;

use crate::models::daily_mission::{DailyMission, DailyMissionProgress};

/// Column list for `daily_mission` queries.
const DAILY_COLUMNS: &str = "id, name, level_requirement, xp_reward, points_reward";

/// Column list for `user_daily_mission_progress` queries.
const PROGRESS_COLUMNS: &str =
    "id, user_id, daily_mission_id, progress_point, completed_at, claimed, last_progress_date";

/// Provides lookup, touch, claim, and reset operations for daily missions.
pub struct DailyMissionRepo;

impl DailyMissionRepo {
    /// List the daily mission catalog.
    pub async fn list(pool: &PgPool) -> Result<Vec<DailyMission>, sqlx::Error> {
        let query = format!("SELECT {DAILY_COLUMNS} FROM daily_mission ORDER BY id");
        sqlx::query_as::<_, DailyMission>(&query)
            .fetch_all(pool)
            .await
    }

    /// Fetch a daily mission by its unique name.
    pub async fn get_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<DailyMission>, sqlx::Error> {
        let query = format!("SELECT {DAILY_COLUMNS} FROM daily_mission WHERE name = $1");
        sqlx::query_as::<_, DailyMission>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a daily mission by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<DailyMission>, sqlx::Error> {
        let query = format!("SELECT {DAILY_COLUMNS} FROM daily_mission WHERE id = $1");
        sqlx::query_as::<_, DailyMission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the user's progress row for a daily mission, if any.
    pub async fn get_progress(
        pool: &PgPool,
        user_id: DbId,
        daily_mission_id: DbId,
    ) -> Result<Option<DailyMissionProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {PROGRESS_COLUMNS} FROM user_daily_mission_progress \
             WHERE user_id = $1 AND daily_mission_id = $2"
        );
        sqlx::query_as::<_, DailyMissionProgress>(&query)
            .bind(user_id)
            .bind(daily_mission_id)
            .fetch_optional(pool)
            .await
    }

    /// Record one progress event.
    ///
    /// Creates the row at `progress_point = 1`; a row from an earlier day is
    /// reset to 1 (lazy day rollover); a same-day row below the requirement
    /// is incremented, and one at or above it is left unchanged.
    pub async fn touch(
        pool: &PgPool,
        user_id: DbId,
        daily_mission_id: DbId,
        level_requirement: i32,
    ) -> Result<DailyMissionProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_daily_mission_progress \
                 (user_id, daily_mission_id, progress_point, last_progress_date) \
             VALUES ($1, $2, 1, CURRENT_DATE) \
             ON CONFLICT (user_id, daily_mission_id) DO UPDATE SET \
                 progress_point = CASE \
                     WHEN user_daily_mission_progress.last_progress_date < CURRENT_DATE THEN 1 \
                     WHEN user_daily_mission_progress.progress_point >= $3 \
                         THEN user_daily_mission_progress.progress_point \
                     ELSE user_daily_mission_progress.progress_point + 1 \
                 END, \
                 completed_at = CASE \
                     WHEN user_daily_mission_progress.last_progress_date < CURRENT_DATE THEN NULL \
                     ELSE user_daily_mission_progress.completed_at \
                 END, \
                 claimed = CASE \
                     WHEN user_daily_mission_progress.last_progress_date < CURRENT_DATE THEN FALSE \
                     ELSE user_daily_mission_progress.claimed \
                 END, \
                 last_progress_date = CURRENT_DATE \
             RETURNING {PROGRESS_COLUMNS}"
        );
        sqlx::query_as::<_, DailyMissionProgress>(&query)
            .bind(user_id)
            .bind(daily_mission_id)
            .bind(level_requirement)
            .fetch_one(pool)
            .await
    }

    /// Mark an auto-complete mission completed once the requirement is met.
    /// Idempotent; a no-op for already-completed or claimed rows.
    pub async fn mark_completed(
        pool: &PgPool,
        progress_id: DbId,
        level_requirement: i32,
    ) -> Result<Option<DailyMissionProgress>, sqlx::Error> {
        let query = format!(
            "UPDATE user_daily_mission_progress SET completed_at = now() \
             WHERE id = $1 AND completed_at IS NULL AND claimed = FALSE \
               AND progress_point >= $2 \
             RETURNING {PROGRESS_COLUMNS}"
        );
        sqlx::query_as::<_, DailyMissionProgress>(&query)
            .bind(progress_id)
            .bind(level_requirement)
            .fetch_optional(pool)
            .await
    }

    /// Claim a mission that auto-completed: requires `completed_at` set and
    /// not yet claimed. Returns `false` (nothing updated) otherwise.
    pub async fn claim_completed(pool: &PgPool, progress_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_daily_mission_progress SET claimed = TRUE \
             WHERE id = $1 AND completed_at IS NOT NULL AND claimed = FALSE",
        )
        .bind(progress_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Claim a manual-claim mission: the claim itself performs the
    /// completion transition, gated on the requirement being met.
    pub async fn complete_and_claim(
        pool: &PgPool,
        progress_id: DbId,
        level_requirement: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_daily_mission_progress \
             SET completed_at = COALESCE(completed_at, now()), claimed = TRUE \
             WHERE id = $1 AND claimed = FALSE AND progress_point >= $2",
        )
        .bind(progress_id)
        .bind(level_requirement)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Nightly reset: zero every row's progress and completion state,
    /// regardless of user. Idempotent. Returns the number of rows touched.
    pub async fn reset_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_daily_mission_progress \
             SET progress_point = 0, completed_at = NULL, claimed = FALSE",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
