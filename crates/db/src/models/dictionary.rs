//! Dictionary entry and per-user practice progress models.

use serde::Serialize;
use signquest_core::types::DbId;
use sqlx::FromRow;

/// A row from the `dictionary` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DictionaryEntry {
    pub id: DbId,
    pub word: String,
    pub definition: String,
    pub video_url: Option<String>,
}

/// A row from the `user_dictionary_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DictionaryProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub dictionary_id: DbId,
    pub progress_point: i32,
}

/// A dictionary entry joined with the user's practice counter
/// (`progress_point = 0` when the user has never practiced it).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EntryWithProgress {
    pub id: DbId,
    pub word: String,
    pub definition: String,
    pub video_url: Option<String>,
    pub progress_point: i32,
}
