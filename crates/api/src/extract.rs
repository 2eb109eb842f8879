//! Request extractors whose rejections use the API's JSON error envelope.

use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`].
///
/// Malformed, mistyped, or non-JSON bodies are rejected through
/// [`AppError`], so clients get `{"error", "code"}` instead of axum's
/// plain-text rejection. Responses serialize exactly like `axum::Json`.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
