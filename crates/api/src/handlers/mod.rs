//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource area.
//! Handlers delegate to the engine services and repositories and map
//! errors via [`crate::error::AppError`].

pub mod dictionary;
pub mod jobs;
pub mod leaderboard;
pub mod missions;
pub mod profile;
pub mod quiz;
pub mod quote;
