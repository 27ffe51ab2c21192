//! Integration tests for the leaderboard and its TTL cache.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get_as};
use signquest_core::types::DbId;
use sqlx::PgPool;

async fn set_points(pool: &PgPool, user_id: DbId, points: i32, xp: i32) {
    sqlx::query("UPDATE users SET points = $2, xp = $3 WHERE id = $1")
        .bind(user_id)
        .bind(points)
        .bind(xp)
        .execute(pool)
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ranked_by_points_with_documented_tiebreak(pool: PgPool) {
    let u1 = create_user(&pool, "ana").await;
    let u2 = create_user(&pool, "bo").await;
    let u3 = create_user(&pool, "cam").await;
    set_points(&pool, u1, 200, 10).await;
    set_points(&pool, u2, 300, 0).await;
    set_points(&pool, u3, 200, 50).await;

    let app = common::build_test_app(pool);
    let json = body_json(get_as(app, "/api/v1/leaderboard", u1).await).await;
    let board = json["data"].as_array().unwrap();

    // points DESC, ties broken by xp DESC then id ASC.
    assert_eq!(board[0]["id"], u2);
    assert_eq!(board[0]["rank"], 1);
    assert_eq!(board[1]["id"], u3);
    assert_eq!(board[1]["rank"], 2);
    assert_eq!(board[2]["id"], u1);
    assert_eq!(board[2]["rank"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cached_reads_ignore_underlying_changes_within_ttl(pool: PgPool) {
    let u1 = create_user(&pool, "dee").await;
    let u2 = create_user(&pool, "eli").await;
    set_points(&pool, u1, 100, 0).await;
    set_points(&pool, u2, 50, 0).await;

    // Default test config: five-minute TTL. The app (and its cache) is
    // shared across both requests via clone.
    let app = common::build_test_app(pool.clone());

    let first = body_json(get_as(app.clone(), "/api/v1/leaderboard", u1).await).await;
    assert_eq!(first["data"][0]["id"], u1);

    // Underlying points change, but the cache window has not expired.
    set_points(&pool, u2, 999, 0).await;

    let second = body_json(get_as(app, "/api/v1/leaderboard", u1).await).await;
    assert_eq!(second, first);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn zero_ttl_always_refreshes(pool: PgPool) {
    let u1 = create_user(&pool, "fay").await;
    let u2 = create_user(&pool, "gus").await;
    set_points(&pool, u1, 100, 0).await;
    set_points(&pool, u2, 50, 0).await;

    let mut config = common::test_config();
    config.leaderboard_ttl_secs = 0;
    let app = common::build_test_app_with(pool.clone(), config);

    let first = body_json(get_as(app.clone(), "/api/v1/leaderboard", u1).await).await;
    assert_eq!(first["data"][0]["id"], u1);

    set_points(&pool, u2, 999, 0).await;

    let second = body_json(get_as(app, "/api/v1/leaderboard", u1).await).await;
    assert_eq!(second["data"][0]["id"], u2);
    assert_eq!(second["data"][0]["rank"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn my_rank_looks_up_the_caller(pool: PgPool) {
    let u1 = create_user(&pool, "hal").await;
    let u2 = create_user(&pool, "ida").await;
    set_points(&pool, u1, 10, 0).await;
    set_points(&pool, u2, 20, 0).await;

    let app = common::build_test_app(pool);

    let json = body_json(get_as(app.clone(), "/api/v1/leaderboard/me", u1).await).await;
    assert_eq!(json["data"]["rank"], 2);

    // A caller absent from the board gets null, not an error.
    let response = get_as(app, "/api/v1/leaderboard/me", 999_999).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"].is_null());
}
