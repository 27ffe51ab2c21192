//! Integration tests for the quiz progression flow: lock chains, answer
//! recording, streaks, and clear rewards.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get_as, post_as, user_totals};
use serde_json::json;
use signquest_core::types::DbId;
use sqlx::PgPool;

/// Question ids of a level, grouped as (stage, id), in play order.
async fn level_questions(pool: &PgPool, level_order: i32) -> (DbId, Vec<(i32, DbId)>) {
    let level: (DbId,) = sqlx::query_as("SELECT id FROM quiz_level WHERE level_order = $1")
        .bind(level_order)
        .fetch_one(pool)
        .await
        .unwrap();
    let questions: Vec<(i32, DbId)> = sqlx::query_as(
        "SELECT stage, id FROM quiz_questions WHERE level_id = $1 ORDER BY stage, question_order",
    )
    .bind(level.0)
    .fetch_all(pool)
    .await
    .unwrap();
    (level.0, questions)
}

async fn answer_correct(app: &axum::Router, user_id: DbId, question_id: DbId) -> serde_json::Value {
    let response = post_as(
        app.clone(),
        "/api/v1/quiz/answers",
        user_id,
        Some(json!({ "question_id": question_id, "correct": true })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Lock chains
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_first_level_unlocked_initially(pool: PgPool) {
    let user_id = create_user(&pool, "ana").await;
    let app = common::build_test_app(pool);

    let response = get_as(app, "/api/v1/quiz/levels", user_id).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let levels = json["data"].as_array().unwrap();
    assert_eq!(levels[0]["unlocked"], true);
    // Level 2 with zero completed questions in level 1 reports locked.
    assert_eq!(levels[1]["unlocked"], false);
    assert_eq!(levels[2]["unlocked"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completing_a_level_unlocks_the_next(pool: PgPool) {
    let user_id = create_user(&pool, "bo").await;
    let (_, questions) = level_questions(&pool, 1).await;
    let app = common::build_test_app(pool);

    for (_, question_id) in &questions {
        answer_correct(&app, user_id, *question_id).await;
    }

    let json = body_json(get_as(app, "/api/v1/quiz/levels", user_id).await).await;
    let levels = json["data"].as_array().unwrap();
    assert_eq!(levels[0]["percent"], 100);
    assert_eq!(levels[1]["unlocked"], true);
    // The chain is strict: level 3 still needs level 2.
    assert_eq!(levels[2]["unlocked"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stage_chain_within_a_level(pool: PgPool) {
    let user_id = create_user(&pool, "cam").await;
    let (level_id, questions) = level_questions(&pool, 1).await;
    let app = common::build_test_app(pool);

    let detail_path = format!("/api/v1/quiz/levels/{level_id}");

    let json = body_json(get_as(app.clone(), &detail_path, user_id).await).await;
    let stages = json["data"]["stages"].as_array().unwrap();
    assert_eq!(stages[0]["unlocked"], true);
    assert_eq!(stages[1]["unlocked"], false);

    // Complete every stage-1 question.
    for (stage, question_id) in &questions {
        if *stage == 1 {
            answer_correct(&app, user_id, *question_id).await;
        }
    }

    let json = body_json(get_as(app, &detail_path, user_id).await).await;
    let stages = json["data"]["stages"].as_array().unwrap();
    assert_eq!(stages[0]["complete"], true);
    assert_eq!(stages[0]["percent"], 100);
    assert_eq!(stages[1]["unlocked"], true);
}

// ---------------------------------------------------------------------------
// Answers and streaks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_time_correct_reported_once(pool: PgPool) {
    let user_id = create_user(&pool, "dee").await;
    let (_, questions) = level_questions(&pool, 1).await;
    let question_id = questions[0].1;
    let app = common::build_test_app(pool.clone());

    let first = answer_correct(&app, user_id, question_id).await;
    assert_eq!(first["data"]["first_time_correct"], true);
    assert_eq!(first["data"]["streak"], 1);

    let repeat = answer_correct(&app, user_id, question_id).await;
    assert_eq!(repeat["data"]["first_time_correct"], false);
    assert!(repeat["data"]["streak"].is_null());

    // The longest streak on the profile reflects the new streak.
    let profile = body_json(get_as(app, "/api/v1/profile", user_id).await).await;
    assert_eq!(profile["data"]["longest_quiz_streak"], 1);
    assert_eq!(profile["data"]["answer_streak"]["current_streak"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn incorrect_answers_complete_nothing(pool: PgPool) {
    let user_id = create_user(&pool, "eli").await;
    let (level_id, questions) = level_questions(&pool, 1).await;
    let app = common::build_test_app(pool);

    let response = post_as(
        app.clone(),
        "/api/v1/quiz/answers",
        user_id,
        Some(json!({ "question_id": questions[0].1, "correct": false })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["first_time_correct"], false);

    let detail = body_json(
        get_as(app, &format!("/api/v1/quiz/levels/{level_id}"), user_id).await,
    )
    .await;
    assert_eq!(detail["data"]["stages"][0]["completed"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn answering_unknown_question_is_404(pool: PgPool) {
    let user_id = create_user(&pool, "fay").await;
    let app = common::build_test_app(pool);

    let response = post_as(
        app,
        "/api/v1/quiz/answers",
        user_id,
        Some(json!({ "question_id": 999_999, "correct": true })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Clear rewards
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn stage_clear_reward_is_flat_and_one_shot(pool: PgPool) {
    let user_id = create_user(&pool, "gus").await;
    let (level_id, questions) = level_questions(&pool, 1).await;
    let app = common::build_test_app(pool.clone());

    let claim_path = format!("/api/v1/quiz/levels/{level_id}/stages/1/claim");

    // Claiming an incomplete stage is rejected.
    let response = post_as(app.clone(), &claim_path, user_id, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    for (stage, question_id) in &questions {
        if *stage == 1 {
            answer_correct(&app, user_id, *question_id).await;
        }
    }

    let response = post_as(app.clone(), &claim_path, user_id, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["points_granted"], 10);
    assert_eq!(json["data"]["xp_granted"], 20);
    assert_eq!(user_totals(&pool, user_id).await, (10, 20));

    // The persisted ledger rejects a second grant.
    let response = post_as(app, &claim_path, user_id, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(user_totals(&pool, user_id).await, (10, 20));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn level_clear_reward_scales_and_persists(pool: PgPool) {
    let user_id = create_user(&pool, "hal").await;
    let (level_id, questions) = level_questions(&pool, 1).await;
    let app = common::build_test_app(pool.clone());

    let claim_path = format!("/api/v1/quiz/levels/{level_id}/claim");

    // Incomplete level: rejected.
    let response = post_as(app.clone(), &claim_path, user_id, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    for (_, question_id) in &questions {
        answer_correct(&app, user_id, *question_id).await;
    }

    let response = post_as(app.clone(), &claim_path, user_id, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // Level order 1: 50 points, 100 xp.
    assert_eq!(json["data"]["points_granted"], 50);
    assert_eq!(json["data"]["xp_granted"], 100);

    // Revisiting the cleared level cannot re-grant.
    let response = post_as(app, &claim_path, user_id, None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
