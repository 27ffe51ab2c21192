//! Long-running mission models.

use serde::Serialize;
use signquest_core::missions::{MissionBase, ProgressState};
use signquest_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `mission` table (the catalog of long-running missions).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Mission {
    pub id: DbId,
    pub name: String,
    pub level_requirement: i32,
    pub xp_reward: i32,
    pub points_reward: i32,
    pub badge_reward: Option<i16>,
}

impl Mission {
    /// Base values for the core evaluation routine.
    pub fn base(&self) -> MissionBase {
        MissionBase {
            level_requirement: self.level_requirement,
            xp_reward: self.xp_reward,
            points_reward: self.points_reward,
            badge_reward: self.badge_reward,
        }
    }
}

/// A row from the `user_mission_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MissionProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub mission_id: DbId,
    pub progress_point: i32,
    pub current_level: i32,
    pub current_level_requirement: i32,
    pub current_xp_reward: i32,
    pub current_points_reward: i32,
    pub last_completed_at: Option<Timestamp>,
}

impl MissionProgress {
    /// Mutable state for the core evaluation routine.
    pub fn state(&self) -> ProgressState {
        ProgressState {
            progress_point: self.progress_point,
            current_level: self.current_level,
            current_level_requirement: self.current_level_requirement,
            current_xp_reward: self.current_xp_reward,
            current_points_reward: self.current_points_reward,
            last_completed_at: self.last_completed_at,
        }
    }
}
