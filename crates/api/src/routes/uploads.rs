//! Route definitions for the `/uploads` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST /presign             -> presign (requires auth)
/// PUT  /{user_id}/{file}    -> receive (signed URL)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/presign", post(uploads::presign))
        .route("/{user_id}/{file}", put(uploads::receive))
}
