//! Repository for the `dictionary` and `user_dictionary_progress` tables.

use signquest_core::missions::MASTERY_THRESHOLD;
use signquest_core::types::DbId;
use sqlx::PgPool;

use crate::models::dictionary::{DictionaryEntry, DictionaryProgress, EntryWithProgress};

/// Column list for `dictionary` queries.
const ENTRY_COLUMNS: &str = "id, word, definition, video_url";

/// Provides dictionary reads and practice-counter mutations.
pub struct DictionaryRepo;

impl DictionaryRepo {
    /// Fetch an entry by id.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<DictionaryEntry>, sqlx::Error> {
        let query = format!("SELECT {ENTRY_COLUMNS} FROM dictionary WHERE id = $1");
        sqlx::query_as::<_, DictionaryEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All entries with the user's practice counters, optionally filtered
    /// by a case-insensitive word substring.
    pub async fn list_with_progress(
        pool: &PgPool,
        user_id: DbId,
        search: Option<&str>,
    ) -> Result<Vec<EntryWithProgress>, sqlx::Error> {
        sqlx::query_as::<_, EntryWithProgress>(
            "SELECT d.id, d.word, d.definition, d.video_url, \
                    COALESCE(p.progress_point, 0) AS progress_point \
             FROM dictionary d \
             LEFT JOIN user_dictionary_progress p \
                    ON p.dictionary_id = d.id AND p.user_id = $1 \
             WHERE $2::text IS NULL OR d.word ILIKE '%' || $2 || '%' \
             ORDER BY d.word",
        )
        .bind(user_id)
        .bind(search)
        .fetch_all(pool)
        .await
    }

    /// Record one practice repetition: create the row at 1 or increment it,
    /// capped at the mastery threshold.
    pub async fn record_practice(
        pool: &PgPool,
        user_id: DbId,
        dictionary_id: DbId,
    ) -> Result<DictionaryProgress, sqlx::Error> {
        sqlx::query_as::<_, DictionaryProgress>(
            "INSERT INTO user_dictionary_progress (user_id, dictionary_id, progress_point) \
             VALUES ($1, $2, 1) \
             ON CONFLICT (user_id, dictionary_id) DO UPDATE SET \
                 progress_point = LEAST(user_dictionary_progress.progress_point + 1, $3) \
             RETURNING id, user_id, dictionary_id, progress_point",
        )
        .bind(user_id)
        .bind(dictionary_id)
        .bind(MASTERY_THRESHOLD)
        .fetch_one(pool)
        .await
    }

    /// Number of entries the user has mastered (feeds "Word Warrior").
    pub async fn count_mastered(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM user_dictionary_progress \
             WHERE user_id = $1 AND progress_point >= $2",
        )
        .bind(user_id)
        .bind(MASTERY_THRESHOLD)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
