//! Quiz content and per-user progress models.

use serde::Serialize;
use signquest_core::quiz::StageCounts;
use signquest_core::types::DbId;
use sqlx::FromRow;

/// A row from the `quiz_level` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizLevel {
    pub id: DbId,
    pub level_order: i32,
    pub name: String,
}

/// A row from the `quiz_questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizQuestion {
    pub id: DbId,
    pub level_id: DbId,
    pub stage: i32,
    pub question_order: i32,
    pub prompt: String,
    pub answer: String,
}

/// A question joined with the user's completion flag.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionWithProgress {
    pub id: DbId,
    pub level_id: DbId,
    pub stage: i32,
    pub question_order: i32,
    pub prompt: String,
    pub is_completed: bool,
}

/// Aggregated per-stage completion counts for one user and level.
#[derive(Debug, Clone, FromRow)]
pub struct StageProgressRow {
    pub stage: i32,
    pub total: i64,
    pub completed: i64,
}

impl From<StageProgressRow> for StageCounts {
    fn from(row: StageProgressRow) -> Self {
        StageCounts {
            stage: row.stage,
            total: row.total,
            completed: row.completed,
        }
    }
}

/// Aggregated per-level completion counts for one user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LevelProgressRow {
    pub id: DbId,
    pub level_order: i32,
    pub name: String,
    pub total: i64,
    pub completed: i64,
}
