//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use box_core::error::CoreError;
use box_core::types::DbId;
use box_db::repositories::SessionRepo;

use crate::auth::session::{hash_jti, token_from_headers, validate_token};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated user resolved from the session cookie or Bearer token.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// `artist` or `studio`.
    pub role: String,
    /// Key of the backing `user_sessions` row.
    pub session_hash: String,
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> AppResult<Self> {
        let token =
            token_from_headers(&parts.headers).ok_or_else(|| unauthorized("Not signed in"))?;

        let claims = validate_token(&token, &state.config.session)
            .map_err(|_| unauthorized("Invalid or expired session"))?;

        let session_hash = hash_jti(&claims.jti);
        let session = SessionRepo::find_active_by_token_hash(&state.pool, &session_hash)
            .await?
            .ok_or_else(|| unauthorized("Session has ended"))?;

        if session.user_id != claims.sub {
            return Err(unauthorized("Invalid or expired session"));
        }

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
            session_hash,
        })
    }
}
