//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the writes the API accepts

pub mod daily_mission;
pub mod dictionary;
pub mod leaderboard;
pub mod mission;
pub mod quiz;
pub mod quote;
pub mod streak;
pub mod user;
