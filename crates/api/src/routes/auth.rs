//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register             -> register
/// POST /login                -> login
/// POST /logout               -> logout (requires auth)
/// GET  /me                   -> me (requires auth)
/// PUT  /me                   -> update_me (requires auth)
/// POST /verify-email         -> verify_email
/// POST /resend-verification  -> resend_verification (requires auth)
/// POST /change-password      -> change_password (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me).put(auth::update_me))
        .route("/verify-email", post(auth::verify_email))
        .route("/resend-verification", post(auth::resend_verification))
        .route("/change-password", post(auth::change_password))
}
