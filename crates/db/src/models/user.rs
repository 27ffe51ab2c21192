//! User entity model and DTOs.
//!
//! Authentication lives upstream; this row carries only the gameplay state
//! (points, XP, badges, streak records).

use serde::{Deserialize, Serialize};
use signquest_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub points: i32,
    pub xp: i32,
    pub badge1: bool,
    pub badge2: bool,
    pub badge3: bool,
    pub badge4: bool,
    pub longest_quiz_streak: i32,
    pub profile_photo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Number of badge flags currently set (feeds the "Sign Master" mission).
    pub fn badge_count(&self) -> i32 {
        [self.badge1, self.badge2, self.badge3, self.badge4]
            .iter()
            .filter(|b| **b)
            .count() as i32
    }
}

/// DTO for creating a new user record.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub profile_photo: Option<String>,
}
