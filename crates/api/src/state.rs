use std::sync::Arc;

use crate::config::ServerConfig;
use crate::engine::leaderboard::LeaderboardCache;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: signquest_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Process-wide leaderboard cache (TTL-refreshed at read time).
    pub leaderboard: Arc<LeaderboardCache>,
}
