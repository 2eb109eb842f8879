//! Handlers for the `/projects` resource.
//!
//! Every route is owner-scoped: another user's project is reported as 404.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use box_core::error::CoreError;
use box_core::project_status::{validate_metadata, validate_status, validate_title};
use box_core::types::DbId;
use box_db::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use box_db::repositories::ProjectRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /projects/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<ProjectFilter>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    if let Some(status) = filter.status.as_deref() {
        validate_status(status).map_err(CoreError::validation)?;
    }
    let projects = ProjectRepo::list_for_user(&state.pool, user.user_id, &filter).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.title = input.title.trim().to_string();
    validate_title(&input.title).map_err(CoreError::validation)?;
    if let Some(status) = input.status.as_deref() {
        validate_status(status).map_err(CoreError::validation)?;
    }
    if let Some(metadata) = input.metadata.as_ref() {
        validate_metadata(metadata).map_err(CoreError::validation)?;
    }

    let project = ProjectRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(project_id = project.id, user_id = user.user_id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = find_owned(&state, id, user.user_id).await?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    if let Some(title) = input.title.as_mut() {
        *title = title.trim().to_string();
        validate_title(title).map_err(CoreError::validation)?;
    }
    if let Some(status) = input.status.as_deref() {
        validate_status(status).map_err(CoreError::validation)?;
    }
    if let Some(metadata) = input.metadata.as_ref() {
        validate_metadata(metadata).map_err(CoreError::validation)?;
    }

    let project = ProjectRepo::update(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<Project>> {
    validate_status(&input.status).map_err(CoreError::validation)?;
    let project = ProjectRepo::set_status(&state.pool, id, user.user_id, &input.status)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    tracing::info!(project_id = id, status = %project.status, "Project status changed");
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, id, user.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Project", id))
    }
}

pub(crate) async fn find_owned(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Project> {
    ProjectRepo::find_for_user(&state.pool, id, user_id)
        .await?
        .ok_or(AppError::not_found("Project", id))
}
