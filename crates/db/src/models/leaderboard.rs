//! Leaderboard query row.

use serde::Serialize;
use signquest_core::types::DbId;
use sqlx::FromRow;

/// One user as fetched for the leaderboard, already sorted by the store
/// (`points` DESC, `xp` DESC, `id` ASC). The 1-based rank is assigned by
/// the cache service, not persisted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardRow {
    pub id: DbId,
    pub username: String,
    pub points: i32,
    pub xp: i32,
    pub profile_photo: Option<String>,
}
