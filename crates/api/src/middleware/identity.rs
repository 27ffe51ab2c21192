//! Caller identity extractor.
//!
//! Authentication happens upstream: the gateway validates the session and
//! injects the numeric user id as a trusted `x-user-id` header. Handlers
//! declare [`RequireUser`] to reject unauthenticated requests with 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use signquest_core::error::CoreError;
use signquest_core::types::DbId;

use crate::error::AppError;

/// Header carrying the authenticated user id, set by the gateway.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Requires an authenticated caller. Rejects with 401 when the identity
/// header is missing or malformed.
///
/// ```ignore
/// async fn me(RequireUser(user_id): RequireUser) -> AppResult<Json<()>> {
///     // user_id is the authenticated user's id
///     Ok(Json(()))
/// }
/// ```
pub struct RequireUser(pub DbId);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing user identity".into()))
            })?;

        let user_id: DbId = value.parse().map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Malformed user identity".into()))
        })?;

        Ok(RequireUser(user_id))
    }
}
