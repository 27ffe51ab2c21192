//! Integration tests for mission sync, level-up grants, the login flow,
//! and daily mission claims.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get_as, post_as, user_totals};
use signquest_core::types::DbId;
use sqlx::PgPool;

/// Find one mission view by name in a GET /missions response.
fn mission<'a>(json: &'a serde_json::Value, name: &str) -> &'a serde_json::Value {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["name"] == name)
        .unwrap_or_else(|| panic!("mission '{name}' missing from overview"))
}

/// Give the user `count` mastered dictionary entries, creating extra words
/// as needed.
async fn master_entries(pool: &PgPool, user_id: DbId, count: i64) {
    let existing: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dictionary")
        .fetch_one(pool)
        .await
        .unwrap();
    for i in existing.0..count {
        sqlx::query("INSERT INTO dictionary (word, definition) VALUES ($1, 'extra test word')")
            .bind(format!("extra-word-{i}"))
            .execute(pool)
            .await
            .unwrap();
    }
    sqlx::query(
        "INSERT INTO user_dictionary_progress (user_id, dictionary_id, progress_point) \
         SELECT $1, id, 5 FROM dictionary ORDER BY id LIMIT $2",
    )
    .bind(user_id)
    .bind(count)
    .execute(pool)
    .await
    .unwrap();
}

/// Move the stored last-login date back one day so the next login counts
/// as a new calendar day.
async fn backdate_login(pool: &PgPool, user_id: DbId) {
    sqlx::query("UPDATE login_streaks SET last_login_date = CURRENT_DATE - 1 WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Word Warrior: scaled completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn word_warrior_levels_up_with_previous_rewards(pool: PgPool) {
    let user_id = create_user(&pool, "ana").await;
    master_entries(&pool, user_id, 10).await;
    let app = common::build_test_app(pool.clone());

    let json = body_json(get_as(app.clone(), "/api/v1/missions", user_id).await).await;
    let warrior = mission(&json, "Word Warrior");

    // Base requirement 10 with 10 mastered entries: one level-up fires.
    assert_eq!(warrior["progress"]["current_level"], 2);
    // round(10 * (1 + (2-1) * 1.5)) = 25
    assert_eq!(warrior["progress"]["current_level_requirement"], 25);
    // The grant is the level-1 amounts, not the level-2 ones.
    assert_eq!(warrior["leveled_up"]["grant_xp"], 150);
    assert_eq!(warrior["leveled_up"]["grant_points"], 75);
    assert_eq!(user_totals(&pool, user_id).await, (75, 150));

    // First completion also earned the mission's badge.
    let profile = body_json(get_as(app.clone(), "/api/v1/profile", user_id).await).await;
    assert_eq!(profile["data"]["badge2"], true);

    // A second read does not fire again: progress (10) < requirement (25).
    let json = body_json(get_as(app, "/api/v1/missions", user_id).await).await;
    let warrior = mission(&json, "Word Warrior");
    assert!(warrior["leveled_up"].is_null());
    assert_eq!(user_totals(&pool, user_id).await, (75, 150));
}

// ---------------------------------------------------------------------------
// Level Up!: fixed tier table from user XP
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn level_up_mission_derives_from_xp(pool: PgPool) {
    let user_id = create_user(&pool, "bo").await;
    sqlx::query("UPDATE users SET xp = 5400 WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool.clone());

    let json = body_json(get_as(app, "/api/v1/missions", user_id).await).await;
    let level_up = mission(&json, "Level Up!");

    // floor(5400 / 1000) = 5 meets the tier-1 requirement of 5.
    assert_eq!(level_up["progress"]["progress_point"], 5);
    assert_eq!(level_up["progress"]["current_level"], 2);
    assert_eq!(level_up["progress"]["current_level_requirement"], 8);
    assert_eq!(level_up["leveled_up"]["grant_xp"], 100);
    assert_eq!(level_up["leveled_up"]["grant_points"], 50);
    assert_eq!(user_totals(&pool, user_id).await, (50, 5500));
}

// ---------------------------------------------------------------------------
// Login Streak!: the five-day scenario
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_streak_five_day_scenario(pool: PgPool) {
    let user_id = create_user(&pool, "cam").await;
    let app = common::build_test_app(pool.clone());

    // Day 1.
    let json = body_json(post_as(app.clone(), "/api/v1/missions/login", user_id, None).await).await;
    assert_eq!(json["data"]["streak"], 1);
    assert_eq!(json["data"]["first_of_day"], true);

    // Four more logins on four distinct subsequent days.
    for day in 2..=5 {
        backdate_login(&pool, user_id).await;
        let json =
            body_json(post_as(app.clone(), "/api/v1/missions/login", user_id, None).await).await;
        assert_eq!(json["data"]["streak"], day);
    }

    // The fifth login met the requirement of 5: the level-up granted
    // exactly the base rewards and consumed the progress.
    assert_eq!(user_totals(&pool, user_id).await, (50, 100));

    let json = body_json(get_as(app.clone(), "/api/v1/missions", user_id).await).await;
    let streak_mission = mission(&json, "Login Streak!");
    assert_eq!(streak_mission["progress"]["current_level"], 2);
    assert_eq!(streak_mission["progress"]["progress_point"], 0);
    assert!(!streak_mission["progress"]["last_completed_at"].is_null());

    // A repeat login the same day neither advances the streak nor grants.
    let json = body_json(post_as(app, "/api/v1/missions/login", user_id, None).await).await;
    assert_eq!(json["data"]["first_of_day"], false);
    assert_eq!(user_totals(&pool, user_id).await, (50, 100));
}

// ---------------------------------------------------------------------------
// Daily missions: touch and claim
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn daily_claim_requires_completion_and_is_one_shot(pool: PgPool) {
    let user_id = create_user(&pool, "dee").await;
    let quiz_whiz: (DbId,) =
        sqlx::query_as("SELECT id FROM daily_mission WHERE name = 'Quiz Whiz'")
            .fetch_one(&pool)
            .await
            .unwrap();
    let app = common::build_test_app(pool.clone());

    let touch_path = "/api/v1/missions/daily/Quiz%20Whiz/touch";
    let claim_path = format!("/api/v1/missions/daily/{}/claim", quiz_whiz.0);

    // One touch of three: claiming must fail and grant nothing.
    post_as(app.clone(), touch_path, user_id, None).await;
    let response = post_as(app.clone(), &claim_path, user_id, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(user_totals(&pool, user_id).await, (0, 0));

    // Reach the requirement; the mission auto-completes.
    post_as(app.clone(), touch_path, user_id, None).await;
    let json = body_json(post_as(app.clone(), touch_path, user_id, None).await).await;
    assert_eq!(json["data"]["progress"]["progress_point"], 3);
    assert!(!json["data"]["progress"]["completed_at"].is_null());
    assert_eq!(json["data"]["claimable"], true);

    // The claim grants the fixed rewards exactly once.
    let response = post_as(app.clone(), &claim_path, user_id, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["points_granted"], 30);
    assert_eq!(json["data"]["xp_granted"], 60);
    assert_eq!(user_totals(&pool, user_id).await, (30, 60));

    // A second claim without a day rollover is rejected, totals unchanged.
    let response = post_as(app, &claim_path, user_id, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(user_totals(&pool, user_id).await, (30, 60));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn daily_touch_caps_at_requirement(pool: PgPool) {
    let user_id = create_user(&pool, "eli").await;
    let app = common::build_test_app(pool);

    let touch_path = "/api/v1/missions/daily/Quiz%20Whiz/touch";
    for _ in 0..5 {
        post_as(app.clone(), touch_path, user_id, None).await;
    }

    let json = body_json(post_as(app, touch_path, user_id, None).await).await;
    // Requirement is 3; the counter never runs past it.
    assert_eq!(json["data"]["progress"]["progress_point"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_daily_mission_is_404(pool: PgPool) {
    let user_id = create_user(&pool, "fay").await;
    let app = common::build_test_app(pool);

    let response = post_as(
        app,
        "/api/v1/missions/daily/No%20Such%20Mission/touch",
        user_id,
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn daily_overview_reports_claimability(pool: PgPool) {
    let user_id = create_user(&pool, "gus").await;
    let app = common::build_test_app(pool);

    let json = body_json(get_as(app.clone(), "/api/v1/missions/daily", user_id).await).await;
    let missions = json["data"].as_array().unwrap();
    assert!(missions.iter().all(|m| m["claimable"] == false));
    assert!(missions.iter().all(|m| m["progress"].is_null()));

    // Daily Login has requirement 1: one touch makes it claimable.
    post_as(
        app.clone(),
        "/api/v1/missions/daily/Daily%20Login/touch",
        user_id,
        None,
    )
    .await;

    let json = body_json(get_as(app, "/api/v1/missions/daily", user_id).await).await;
    let login = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["name"] == "Daily Login")
        .unwrap();
    assert_eq!(login["claimable"], true);
    assert_eq!(login["progress"]["progress_point"], 1);
}
