//! Daily mission models.

use chrono::NaiveDate;
use serde::Serialize;
use signquest_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `daily_mission` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyMission {
    pub id: DbId,
    pub name: String,
    pub level_requirement: i32,
    pub xp_reward: i32,
    pub points_reward: i32,
}

/// A row from the `user_daily_mission_progress` table.
///
/// `last_progress_date` drives the lazy day rollover: a row whose date is
/// earlier than today is logically reset the next time it is touched, in
/// addition to the nightly bulk reset.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyMissionProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub daily_mission_id: DbId,
    pub progress_point: i32,
    pub completed_at: Option<Timestamp>,
    pub claimed: bool,
    pub last_progress_date: NaiveDate,
}
