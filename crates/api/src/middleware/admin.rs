//! Shared-secret gate for the admin API.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use box_core::error::CoreError;
use box_core::hashing::secrets_match;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the admin secret.
pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// Grants access when `x-admin-secret` matches `ADMIN_SECRET`.
///
/// With no `ADMIN_SECRET` configured every admin request is 403; a missing
/// or wrong header is 401.
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.config.admin_secret.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::Forbidden("Admin API is disabled".into()))
        })?;

        let provided = parts
            .headers
            .get(ADMIN_SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing admin secret".into()))
            })?;

        if !secrets_match(provided, expected) {
            tracing::warn!("Rejected admin request with wrong secret");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid admin secret".into(),
            )));
        }
        Ok(RequireAdmin)
    }
}
