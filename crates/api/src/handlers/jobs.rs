//! Handler for externally scheduled jobs.
//!
//! The daily-mission reset can be triggered by an external scheduler via a
//! shared-secret query parameter, in addition to the in-process midnight
//! task. The reset statement is idempotent, so overlapping invocations are
//! harmless.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use signquest_core::error::CoreError;

use signquest_db::repositories::DailyMissionRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the scheduled-job trigger.
#[derive(Debug, Deserialize)]
pub struct JobParams {
    pub secret: Option<String>,
}

/// Response for a completed reset run.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub reset: bool,
    pub rows: u64,
}

/// POST /api/v1/jobs/daily-reset?secret=...
///
/// Reset every user's daily-mission progress. Requires the configured
/// `CRON_SECRET`; when none is configured the endpoint always rejects.
pub async fn daily_reset(
    State(state): State<AppState>,
    Query(params): Query<JobParams>,
) -> AppResult<impl IntoResponse> {
    let authorized = matches!(
        (&state.config.cron_secret, &params.secret),
        (Some(expected), Some(given)) if expected == given
    );
    if !authorized {
        return Err(CoreError::Forbidden("Invalid scheduler secret".into()).into());
    }

    let rows = DailyMissionRepo::reset_all(&state.pool).await?;
    tracing::info!(rows, "Daily mission reset triggered via scheduler endpoint");

    Ok(Json(DataResponse {
        data: ResetResponse { reset: true, rows },
    }))
}
