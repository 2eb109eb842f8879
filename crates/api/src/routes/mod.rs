pub mod admin;
pub mod auth;
pub mod community;
pub mod health;
pub mod notes;
pub mod press_kit;
pub mod project;
pub mod public;
pub mod studio;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/verify-email                               verify email (public)
/// /auth/logout, /auth/me, ...                      session required
///
/// /projects                                        own projects, exports, documents
/// /notes                                           own creative notes, share
/// /community                                       feed, favorites, comments
/// /studio/roster                                   studio role
/// /studio/invitations, /studio/studios             artist role
/// /press-kit                                       own press kit
/// /uploads/presign                                 session required
/// /uploads/{user_id}/{file}                        signed URL, no session
/// /admin                                           x-admin-secret
/// /public/epk/{slug}                               public press kits
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/notes", notes::router())
        .nest("/community", community::router())
        .nest("/studio", studio::router())
        .nest("/press-kit", press_kit::router())
        .nest("/uploads", uploads::router())
        .nest("/admin", admin::router())
        .nest("/public", public::router())
}
