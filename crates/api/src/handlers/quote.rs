//! Handler for motivational quotes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use signquest_db::repositories::QuoteRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/quote
///
/// A random motivational quote. Returns 204 when none are configured.
pub async fn random_quote(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    match QuoteRepo::random(&state.pool).await? {
        Some(quote) => Ok(Json(DataResponse { data: quote }).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
