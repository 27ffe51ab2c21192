//! Repository for the `mission` and `user_mission_progress` tables.

use signquest_core::missions::LevelUp;
use signquest_core::types::DbId;
use sqlx::PgPool;

use crate::models::mission::{Mission, MissionProgress};

/// Column list for `mission` queries.
const MISSION_COLUMNS: &str = "id, name, level_requirement, xp_reward, points_reward, badge_reward";

/// Column list for `user_mission_progress` queries.
const PROGRESS_COLUMNS: &str = "id, user_id, mission_id, progress_point, current_level, \
     current_level_requirement, current_xp_reward, current_points_reward, last_completed_at";

/// Provides lookup and progress mutations for long-running missions.
pub struct MissionRepo;

impl MissionRepo {
    /// List the mission catalog.
    pub async fn list(pool: &PgPool) -> Result<Vec<Mission>, sqlx::Error> {
        let query = format!("SELECT {MISSION_COLUMNS} FROM mission ORDER BY id");
        sqlx::query_as::<_, Mission>(&query).fetch_all(pool).await
    }

    /// Fetch a mission by its unique name.
    pub async fn get_by_name(pool: &PgPool, name: &str) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!("SELECT {MISSION_COLUMNS} FROM mission WHERE name = $1");
        sqlx::query_as::<_, Mission>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a mission by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Mission>, sqlx::Error> {
        let query = format!("SELECT {MISSION_COLUMNS} FROM mission WHERE id = $1");
        sqlx::query_as::<_, Mission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the user's progress row for a mission, creating it at level 1
    /// with the mission's base values when absent.
    pub async fn get_or_create_progress(
        pool: &PgPool,
        user_id: DbId,
        mission: &Mission,
    ) -> Result<MissionProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_mission_progress \
                 (user_id, mission_id, progress_point, current_level, \
                  current_level_requirement, current_xp_reward, current_points_reward) \
             VALUES ($1, $2, 0, 1, $3, $4, $5) \
             ON CONFLICT (user_id, mission_id) DO UPDATE SET \
                 user_id = user_mission_progress.user_id \
             RETURNING {PROGRESS_COLUMNS}"
        );
        sqlx::query_as::<_, MissionProgress>(&query)
            .bind(user_id)
            .bind(mission.id)
            .bind(mission.level_requirement)
            .bind(mission.xp_reward)
            .bind(mission.points_reward)
            .fetch_one(pool)
            .await
    }

    /// Overwrite `progress_point` with a freshly derived value.
    ///
    /// Callers compare against the stored value first and skip the write
    /// when nothing changed.
    pub async fn set_progress_point(
        pool: &PgPool,
        progress_id: DbId,
        value: i32,
    ) -> Result<MissionProgress, sqlx::Error> {
        let query = format!(
            "UPDATE user_mission_progress SET progress_point = $2 \
             WHERE id = $1 \
             RETURNING {PROGRESS_COLUMNS}"
        );
        sqlx::query_as::<_, MissionProgress>(&query)
            .bind(progress_id)
            .bind(value)
            .fetch_one(pool)
            .await
    }

    /// Add 1 to `progress_point` (touch-incremented missions).
    pub async fn increment_progress(
        pool: &PgPool,
        progress_id: DbId,
    ) -> Result<MissionProgress, sqlx::Error> {
        let query = format!(
            "UPDATE user_mission_progress SET progress_point = progress_point + 1 \
             WHERE id = $1 \
             RETURNING {PROGRESS_COLUMNS}"
        );
        sqlx::query_as::<_, MissionProgress>(&query)
            .bind(progress_id)
            .fetch_one(pool)
            .await
    }

    /// Apply a level-up as one conditional statement.
    ///
    /// The `current_level = $2` guard is the compare-and-swap: of two
    /// concurrent requests that both evaluated the same state, only one
    /// matches and advances; the other sees `None` and grants nothing.
    /// The requirement re-check keeps a stale evaluation from advancing a
    /// row whose progress was reset in between.
    pub async fn advance_level(
        pool: &PgPool,
        progress_id: DbId,
        observed_level: i32,
        up: &LevelUp,
    ) -> Result<Option<MissionProgress>, sqlx::Error> {
        let query = format!(
            "UPDATE user_mission_progress SET \
                 current_level = $3, \
                 current_level_requirement = $4, \
                 current_xp_reward = $5, \
                 current_points_reward = $6, \
                 progress_point = $7, \
                 last_completed_at = now() \
             WHERE id = $1 AND current_level = $2 \
               AND progress_point >= current_level_requirement \
             RETURNING {PROGRESS_COLUMNS}"
        );
        sqlx::query_as::<_, MissionProgress>(&query)
            .bind(progress_id)
            .bind(observed_level)
            .bind(up.new_level)
            .bind(up.new_requirement)
            .bind(up.new_xp_reward)
            .bind(up.new_points_reward)
            .bind(up.new_progress_point)
            .fetch_optional(pool)
            .await
    }
}
