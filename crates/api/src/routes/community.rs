//! Route definitions for the `/community` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::community;
use crate::state::AppState;

/// Routes mounted at `/community`.
///
/// ```text
/// GET    /                            -> feed
/// GET    /mine                        -> mine
/// GET    /{id}                        -> get_item
/// POST   /{id}/favorite               -> favorite
/// DELETE /{id}/favorite               -> unfavorite
/// GET    /{id}/comments               -> list_comments
/// POST   /{id}/comments               -> create_comment
/// DELETE /{id}/comments/{comment_id}  -> delete_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(community::feed))
        .route("/mine", get(community::mine))
        .route("/{id}", get(community::get_item))
        .route(
            "/{id}/favorite",
            post(community::favorite).delete(community::unfavorite),
        )
        .route(
            "/{id}/comments",
            get(community::list_comments).post(community::create_comment),
        )
        .route("/{id}/comments/{comment_id}", delete(community::delete_comment))
}
