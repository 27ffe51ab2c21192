//! Handlers for the sign-language dictionary and practice tracking.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use signquest_core::error::CoreError;
use signquest_core::missions::{DAILY_DICTIONARY, MASTERY_THRESHOLD};
use signquest_core::types::DbId;

use signquest_db::repositories::DictionaryRepo;

use crate::engine::missions as engine;
use crate::error::AppResult;
use crate::middleware::identity::RequireUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the dictionary listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
}

/// One dictionary entry with the caller's practice state.
#[derive(Debug, Serialize)]
pub struct EntryView {
    pub id: DbId,
    pub word: String,
    pub definition: String,
    pub video_url: Option<String>,
    pub progress_point: i32,
    pub mastered: bool,
}

/// Response for a recorded practice repetition.
#[derive(Debug, Serialize)]
pub struct PracticeResponse {
    pub progress_point: i32,
    pub mastered: bool,
}

/// GET /api/v1/dictionary?search=
///
/// All entries with the caller's practice counters, optionally filtered by
/// a case-insensitive substring of the word.
pub async fn list_entries(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let entries = DictionaryRepo::list_with_progress(&state.pool, user_id, search).await?;

    let views: Vec<EntryView> = entries
        .into_iter()
        .map(|e| EntryView {
            mastered: e.progress_point >= MASTERY_THRESHOLD,
            id: e.id,
            word: e.word,
            definition: e.definition,
            video_url: e.video_url,
            progress_point: e.progress_point,
        })
        .collect();

    Ok(Json(DataResponse { data: views }))
}

/// POST /api/v1/dictionary/{id}/practice
///
/// Record one successful practice repetition of an entry. The counter caps
/// at the mastery threshold; the daily dictionary mission is touched as a
/// side effect.
pub async fn record_practice(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(dictionary_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = DictionaryRepo::get(&state.pool, dictionary_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "dictionary entry",
            key: dictionary_id.to_string(),
        })?;

    let progress = DictionaryRepo::record_practice(&state.pool, user_id, entry.id).await?;

    engine::touch_daily_if_present(&state.pool, user_id, DAILY_DICTIONARY).await;

    Ok(Json(DataResponse {
        data: PracticeResponse {
            progress_point: progress.progress_point,
            mastered: progress.progress_point >= MASTERY_THRESHOLD,
        },
    }))
}
