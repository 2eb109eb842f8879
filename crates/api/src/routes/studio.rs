//! Route definitions for the `/studio` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::studio;
use crate::state::AppState;

/// Routes mounted at `/studio`.
///
/// ```text
/// GET    /roster                         -> roster (studio)
/// POST   /roster                         -> invite (studio)
/// DELETE /roster/{artist_id}             -> remove (studio)
/// GET    /roster/{artist_id}/projects    -> artist_projects (studio)
///
/// GET    /invitations                    -> invitations (artist)
/// POST   /invitations/{id}/accept        -> accept (artist)
/// POST   /invitations/{id}/decline       -> decline (artist)
/// GET    /studios                        -> my_studios (artist)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roster", get(studio::roster).post(studio::invite))
        .route("/roster/{artist_id}", delete(studio::remove))
        .route("/roster/{artist_id}/projects", get(studio::artist_projects))
        .route("/invitations", get(studio::invitations))
        .route("/invitations/{id}/accept", post(studio::accept))
        .route("/invitations/{id}/decline", post(studio::decline))
        .route("/studios", get(studio::my_studios))
}
