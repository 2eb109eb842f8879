//! Route definitions for the `/projects` resource.
//!
//! Also mounts royalty exports and legal document rendering, which read
//! project metadata.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{documents, export, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// PUT    /{id}/status               -> set_status
///
/// GET    /export/formats            -> export::list_formats
/// GET    /export/{format}           -> export::export_all
/// GET    /{id}/export/{format}      -> export::export_project
///
/// GET    /documents/templates       -> documents::list_templates
/// POST   /{id}/documents/{template} -> documents::render
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/status", put(project::set_status))
        .route("/export/formats", get(export::list_formats))
        .route("/export/{format}", get(export::export_all))
        .route("/{id}/export/{format}", get(export::export_project))
        .route("/documents/templates", get(documents::list_templates))
        .route("/{id}/documents/{template}", post(documents::render))
}
