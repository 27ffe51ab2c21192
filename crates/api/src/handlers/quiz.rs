//! Handlers for quiz levels, stages, answers, and clear rewards.
//!
//! Lock state follows the strict linear chain: the first stage of a level
//! is always unlocked, later stages need the previous stage fully
//! completed, and a level needs the previous level fully completed.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use signquest_core::error::CoreError;
use signquest_core::quiz::{self, StageCounts};
use signquest_core::types::DbId;

use signquest_db::models::quiz::{QuestionWithProgress, QuizLevel};
use signquest_db::repositories::{QuizRepo, UserRepo};

use crate::engine::missions as engine;
use crate::error::AppResult;
use crate::middleware::identity::RequireUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// One level in the overview list.
#[derive(Debug, Serialize)]
pub struct LevelSummary {
    pub id: DbId,
    pub level_order: i32,
    pub name: String,
    pub total: i64,
    pub completed: i64,
    pub percent: i32,
    pub unlocked: bool,
}

/// One stage in the level detail, with its questions.
#[derive(Debug, Serialize)]
pub struct StageView {
    pub stage: i32,
    pub total: i64,
    pub completed: i64,
    pub percent: i32,
    pub complete: bool,
    pub unlocked: bool,
    pub questions: Vec<QuestionWithProgress>,
}

/// Level detail: the level plus its stages in play order.
#[derive(Debug, Serialize)]
pub struct LevelDetail {
    #[serde(flatten)]
    pub level: QuizLevel,
    pub stages: Vec<StageView>,
}

/// DTO for submitting an answer.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question_id: DbId,
    pub correct: bool,
}

/// Response for a submitted answer.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    /// True exactly when this was the first-time completion of the question.
    pub first_time_correct: bool,
    /// Current consecutive-day answer streak (only on first-time completions).
    pub streak: Option<i32>,
}

/// Response for a stage or level clear claim.
#[derive(Debug, Serialize)]
pub struct ClearReward {
    pub points_granted: i32,
    pub xp_granted: i32,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/quiz/levels
///
/// All levels with the caller's completion counts and lock state.
pub async fn list_levels(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let counts = QuizRepo::level_counts(&state.pool, user_id).await?;

    let mut previous: Option<(i64, i64)> = None;
    let mut levels = Vec::with_capacity(counts.len());
    for row in counts {
        let unlocked = quiz::level_unlocked(previous);
        previous = Some((row.total, row.completed));
        levels.push(LevelSummary {
            id: row.id,
            level_order: row.level_order,
            name: row.name,
            total: row.total,
            completed: row.completed,
            percent: quiz::completion_percent(row.completed, row.total),
            unlocked,
        });
    }

    Ok(Json(DataResponse { data: levels }))
}

/// GET /api/v1/quiz/levels/{id}
///
/// A level's stages with lock state and per-question progress.
pub async fn get_level(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(level_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let level = QuizRepo::get_level(&state.pool, level_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "quiz level",
            key: level_id.to_string(),
        })?;

    let stage_counts: Vec<StageCounts> = QuizRepo::stage_counts(&state.pool, user_id, level_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let questions = QuizRepo::questions_with_progress(&state.pool, user_id, level_id).await?;

    let stages = stage_counts
        .iter()
        .enumerate()
        .map(|(index, counts)| StageView {
            stage: counts.stage,
            total: counts.total,
            completed: counts.completed,
            percent: quiz::completion_percent(counts.completed, counts.total),
            complete: quiz::stage_complete(counts),
            unlocked: quiz::stage_unlocked(&stage_counts, index),
            questions: questions
                .iter()
                .filter(|q| q.stage == counts.stage)
                .cloned()
                .collect(),
        })
        .collect();

    Ok(Json(DataResponse {
        data: LevelDetail { level, stages },
    }))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/v1/quiz/answers
///
/// Record an answer. A first-time correct answer also advances the
/// consecutive-day answer streak and the daily quiz mission.
pub async fn submit_answer(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Json(input): Json<AnswerRequest>,
) -> AppResult<impl IntoResponse> {
    let question = QuizRepo::get_question(&state.pool, input.question_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "quiz question",
            key: input.question_id.to_string(),
        })?;

    if !input.correct {
        QuizRepo::record_incorrect(&state.pool, user_id, question.id).await?;
        return Ok(Json(DataResponse {
            data: AnswerResponse {
                first_time_correct: false,
                streak: None,
            },
        }));
    }

    let first_time = QuizRepo::record_correct(&state.pool, user_id, question.id).await?;

    let streak = if first_time {
        Some(engine::on_first_correct_answer(&state.pool, user_id).await?)
    } else {
        None
    };

    Ok(Json(DataResponse {
        data: AnswerResponse {
            first_time_correct: first_time,
            streak,
        },
    }))
}

/// POST /api/v1/quiz/levels/{id}/stages/{stage}/claim
///
/// Claim the flat stage-clear reward. The persisted ledger makes the grant
/// one-shot per user/level/stage.
pub async fn claim_stage_clear(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((level_id, stage)): Path<(DbId, i32)>,
) -> AppResult<impl IntoResponse> {
    let counts = QuizRepo::stage_counts(&state.pool, user_id, level_id).await?;
    let stage_counts = counts
        .into_iter()
        .map(StageCounts::from)
        .find(|c| c.stage == stage)
        .ok_or_else(|| CoreError::NotFound {
            entity: "quiz stage",
            key: format!("{level_id}/{stage}"),
        })?;

    if !quiz::stage_complete(&stage_counts) {
        return Err(CoreError::Conflict("Stage is not complete yet".into()).into());
    }

    if !QuizRepo::record_stage_clear(&state.pool, user_id, level_id, stage).await? {
        return Err(CoreError::Conflict("Stage reward already claimed".into()).into());
    }

    UserRepo::grant_rewards(
        &state.pool,
        user_id,
        quiz::STAGE_CLEAR_COINS,
        quiz::STAGE_CLEAR_XP,
    )
    .await?;

    tracing::info!(user_id, level_id, stage, "Stage clear reward granted");

    Ok(Json(DataResponse {
        data: ClearReward {
            points_granted: quiz::STAGE_CLEAR_COINS,
            xp_granted: quiz::STAGE_CLEAR_XP,
        },
    }))
}

/// POST /api/v1/quiz/levels/{id}/claim
///
/// Claim the level-clear reward (`50 × order` points, `100 × order` XP),
/// one-shot per user/level via the persisted ledger.
pub async fn claim_level_clear(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(level_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let level = QuizRepo::get_level(&state.pool, level_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "quiz level",
            key: level_id.to_string(),
        })?;

    let counts = QuizRepo::stage_counts(&state.pool, user_id, level_id).await?;
    let (total, completed) = counts
        .iter()
        .fold((0, 0), |(t, c), row| (t + row.total, c + row.completed));
    if total == 0 || completed < total {
        return Err(CoreError::Conflict("Level is not complete yet".into()).into());
    }

    if !QuizRepo::record_level_clear(&state.pool, user_id, level_id).await? {
        return Err(CoreError::Conflict("Level reward already claimed".into()).into());
    }

    let (points, xp) = quiz::level_clear_reward(level.level_order);
    UserRepo::grant_rewards(&state.pool, user_id, points, xp).await?;

    tracing::info!(user_id, level_id, points, xp, "Level clear reward granted");

    Ok(Json(DataResponse {
        data: ClearReward {
            points_granted: points,
            xp_granted: xp,
        },
    }))
}
