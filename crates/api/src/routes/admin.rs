//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require `x-admin-secret`.
///
/// ```text
/// GET    /stats                          -> stats
/// GET    /users                          -> list_users
/// PUT    /users/{id}/active              -> set_user_active
/// GET    /submissions                    -> list_submissions (?status=)
/// POST   /submissions/{id}/approve       -> approve
/// POST   /submissions/{id}/reject        -> reject
/// DELETE /comments/{id}                  -> delete_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::stats))
        .route("/users", get(admin::list_users))
        .route("/users/{id}/active", put(admin::set_user_active))
        .route("/submissions", get(admin::list_submissions))
        .route("/submissions/{id}/approve", post(admin::approve))
        .route("/submissions/{id}/reject", post(admin::reject))
        .route("/comments/{id}", delete(admin::delete_comment))
}
