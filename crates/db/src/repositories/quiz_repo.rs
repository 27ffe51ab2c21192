//! Repository for quiz content, per-user answers, and clear-reward ledgers.

use signquest_core::types::DbId;
use sqlx::PgPool;

use crate::models::quiz::{
    LevelProgressRow, QuestionWithProgress, QuizLevel, QuizQuestion, StageProgressRow,
};

/// Column list for `quiz_level` queries.
const LEVEL_COLUMNS: &str = "id, level_order, name";

/// Column list for `quiz_questions` queries.
const QUESTION_COLUMNS: &str = "id, level_id, stage, question_order, prompt, answer";

/// Provides quiz content reads, answer upserts, and clear ledgers.
pub struct QuizRepo;

impl QuizRepo {
    /// All levels in play order.
    pub async fn list_levels(pool: &PgPool) -> Result<Vec<QuizLevel>, sqlx::Error> {
        let query = format!("SELECT {LEVEL_COLUMNS} FROM quiz_level ORDER BY level_order");
        sqlx::query_as::<_, QuizLevel>(&query).fetch_all(pool).await
    }

    /// Fetch a level by id.
    pub async fn get_level(pool: &PgPool, id: DbId) -> Result<Option<QuizLevel>, sqlx::Error> {
        let query = format!("SELECT {LEVEL_COLUMNS} FROM quiz_level WHERE id = $1");
        sqlx::query_as::<_, QuizLevel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a question by id.
    pub async fn get_question(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<QuizQuestion>, sqlx::Error> {
        let query = format!("SELECT {QUESTION_COLUMNS} FROM quiz_questions WHERE id = $1");
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A level's questions joined with the user's completion flags,
    /// in stage/question order.
    pub async fn questions_with_progress(
        pool: &PgPool,
        user_id: DbId,
        level_id: DbId,
    ) -> Result<Vec<QuestionWithProgress>, sqlx::Error> {
        sqlx::query_as::<_, QuestionWithProgress>(
            "SELECT q.id, q.level_id, q.stage, q.question_order, q.prompt, \
                    COALESCE(p.is_completed, FALSE) AS is_completed \
             FROM quiz_questions q \
             LEFT JOIN user_quiz_progress p \
                    ON p.question_id = q.id AND p.user_id = $1 \
             WHERE q.level_id = $2 \
             ORDER BY q.stage, q.question_order, q.id",
        )
        .bind(user_id)
        .bind(level_id)
        .fetch_all(pool)
        .await
    }

    /// Per-stage completion counts for one user and level, in stage order.
    pub async fn stage_counts(
        pool: &PgPool,
        user_id: DbId,
        level_id: DbId,
    ) -> Result<Vec<StageProgressRow>, sqlx::Error> {
        sqlx::query_as::<_, StageProgressRow>(
            "SELECT q.stage, COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE p.is_completed) AS completed \
             FROM quiz_questions q \
             LEFT JOIN user_quiz_progress p \
                    ON p.question_id = q.id AND p.user_id = $1 \
             WHERE q.level_id = $2 \
             GROUP BY q.stage \
             ORDER BY q.stage",
        )
        .bind(user_id)
        .bind(level_id)
        .fetch_all(pool)
        .await
    }

    /// Per-level completion counts for one user, in play order.
    pub async fn level_counts(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<LevelProgressRow>, sqlx::Error> {
        sqlx::query_as::<_, LevelProgressRow>(
            "SELECT l.id, l.level_order, l.name, COUNT(q.id) AS total, \
                    COUNT(*) FILTER (WHERE p.is_completed) AS completed \
             FROM quiz_level l \
             LEFT JOIN quiz_questions q ON q.level_id = l.id \
             LEFT JOIN user_quiz_progress p \
                    ON p.question_id = q.id AND p.user_id = $1 \
             GROUP BY l.id, l.level_order, l.name \
             ORDER BY l.level_order",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Record a correct answer. Returns `true` exactly when this was the
    /// first-time completion (row inserted, or flipped from incomplete);
    /// repeats return `false`. One statement, so two concurrent submissions
    /// of the same answer produce a single `true`.
    pub async fn record_correct(
        pool: &PgPool,
        user_id: DbId,
        question_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "INSERT INTO user_quiz_progress (user_id, question_id, is_completed) \
             VALUES ($1, $2, TRUE) \
             ON CONFLICT (user_id, question_id) DO UPDATE SET is_completed = TRUE \
             WHERE user_quiz_progress.is_completed = FALSE \
             RETURNING id",
        )
        .bind(user_id)
        .bind(question_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }

    /// Record an incorrect answer. Creates the row as incomplete; never
    /// downgrades a completed answer.
    pub async fn record_incorrect(
        pool: &PgPool,
        user_id: DbId,
        question_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_quiz_progress (user_id, question_id, is_completed) \
             VALUES ($1, $2, FALSE) \
             ON CONFLICT (user_id, question_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(question_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Record a stage clear in the reward ledger. Returns `true` only for
    /// the first clear of this user/level/stage; the caller grants rewards
    /// exactly when it does.
    pub async fn record_stage_clear(
        pool: &PgPool,
        user_id: DbId,
        level_id: DbId,
        stage: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_stage_clears (user_id, level_id, stage) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, level_id, stage) DO NOTHING",
        )
        .bind(user_id)
        .bind(level_id)
        .bind(stage)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Record a level clear in the reward ledger. Same one-shot contract as
    /// [`Self::record_stage_clear`].
    pub async fn record_level_clear(
        pool: &PgPool,
        user_id: DbId,
        level_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_level_clears (user_id, level_id) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id, level_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(level_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
