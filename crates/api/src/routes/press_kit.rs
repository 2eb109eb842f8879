//! Route definitions for the `/press-kit` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::press_kit;
use crate::state::AppState;

/// Routes mounted at `/press-kit`.
///
/// ```text
/// GET  /           -> get_mine
/// PUT  /           -> upsert
/// POST /publish    -> publish
/// POST /unpublish  -> unpublish
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(press_kit::get_mine).put(press_kit::upsert))
        .route("/publish", post(press_kit::publish))
        .route("/unpublish", post(press_kit::unpublish))
}
