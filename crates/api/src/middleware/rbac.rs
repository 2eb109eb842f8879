//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not match.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use box_core::error::CoreError;
use box_core::roles::{ROLE_ARTIST, ROLE_STUDIO};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `studio` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn roster(RequireStudio(user): RequireStudio) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStudio(pub AuthUser);

impl FromRequestParts<AppState> for RequireStudio {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_STUDIO {
            return Err(AppError::Core(CoreError::Forbidden(
                "Studio account required".into(),
            )));
        }
        Ok(RequireStudio(user))
    }
}

/// Requires the `artist` role. Rejects with 403 Forbidden otherwise.
pub struct RequireArtist(pub AuthUser);

impl FromRequestParts<AppState> for RequireArtist {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ARTIST {
            return Err(AppError::Core(CoreError::Forbidden(
                "Artist account required".into(),
            )));
        }
        Ok(RequireArtist(user))
    }
}
