//! Unauthenticated routes mounted at `/public`.

use axum::routing::get;
use axum::Router;

use crate::handlers::press_kit;
use crate::state::AppState;

/// ```text
/// GET /epk/{slug}  -> press_kit::public_by_slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/epk/{slug}", get(press_kit::public_by_slug))
}
