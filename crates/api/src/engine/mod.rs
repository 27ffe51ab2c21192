//! Engine services: mission orchestration and the leaderboard cache.
//!
//! Handlers stay thin; the multi-step read/evaluate/write sequences live
//! here, built on the pure rules in `signquest_core` and the atomic
//! conditional writes in `signquest_db`.

pub mod leaderboard;
pub mod missions;
