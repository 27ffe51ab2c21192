pub mod dictionary;
pub mod health;
pub mod jobs;
pub mod leaderboard;
pub mod missions;
pub mod profile;
pub mod quiz;
pub mod quote;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /profile                                 authenticated user's profile
///
/// /quiz/levels                             levels with lock state (GET)
/// /quiz/levels/{id}                        level detail with stages (GET)
/// /quiz/levels/{id}/claim                  level-clear reward (POST)
/// /quiz/levels/{id}/stages/{stage}/claim   stage-clear reward (POST)
/// /quiz/answers                            record an answer (POST)
///
/// /dictionary                              list/search entries (GET)
/// /dictionary/{id}/practice                record a repetition (POST)
///
/// /missions                                long-running missions (GET)
/// /missions/login                          login event (POST)
/// /missions/daily                          daily missions (GET)
/// /missions/daily/{name}/touch             daily progress event (POST)
/// /missions/daily/{id}/claim               claim a daily mission (POST)
///
/// /leaderboard                             ranked users, cache-served (GET)
/// /leaderboard/me                          caller's rank (GET)
///
/// /quote                                   random quote (GET)
///
/// /jobs/daily-reset                        scheduler trigger (POST, secret)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/profile", profile::router())
        .nest("/quiz", quiz::router())
        .nest("/dictionary", dictionary::router())
        .nest("/missions", missions::router())
        .nest("/leaderboard", leaderboard::router())
        .nest("/quote", quote::router())
        .nest("/jobs", jobs::router())
}
