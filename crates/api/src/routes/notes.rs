//! Route definitions for the `/notes` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Routes mounted at `/notes`.
///
/// ```text
/// GET    /                 -> list (?category=)
/// POST   /                 -> create
/// PUT    /reorder          -> reorder
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// POST   /{id}/toggle-pin  -> toggle_pin
/// POST   /{id}/share       -> share
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::list).post(notes::create))
        .route("/reorder", put(notes::reorder))
        .route(
            "/{id}",
            get(notes::get_by_id)
                .put(notes::update)
                .delete(notes::delete),
        )
        .route("/{id}/toggle-pin", post(notes::toggle_pin))
        .route("/{id}/share", post(notes::share))
}
