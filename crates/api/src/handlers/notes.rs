//! Handlers for the `/notes` resource (the private idea journal).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use box_core::community::{
    validate_caption, validate_transition, SUBMISSION_PENDING, SUBMISSION_REJECTED,
};
use box_core::error::CoreError;
use box_core::notes::{
    sort_notes, validate_category, validate_media_urls, validate_note_content,
    validate_note_title, validate_reorder, NoteOrderKey,
};
use box_core::types::DbId;
use box_db::models::community::SharedContent;
use box_db::models::creative_note::{CreateCreativeNote, CreativeNote, UpdateCreativeNote};
use box_db::repositories::{CreativeNoteRepo, SharedContentRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NoteListParams {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub note_ids: Vec<DbId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShareRequest {
    pub caption: Option<String>,
}

/// GET /api/v1/notes
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<NoteListParams>,
) -> AppResult<Json<DataResponse<Vec<CreativeNote>>>> {
    if let Some(category) = params.category.as_deref() {
        validate_category(category).map_err(CoreError::validation)?;
    }
    let mut notes =
        CreativeNoteRepo::list_for_user(&state.pool, user.user_id, params.category.as_deref())
            .await?;
    sort_notes(&mut notes, |n| NoteOrderKey {
        is_pinned: n.is_pinned,
        sort_order: n.sort_order,
        updated_at: n.updated_at,
    });
    Ok(Json(DataResponse { data: notes }))
}

/// POST /api/v1/notes
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCreativeNote>,
) -> AppResult<(StatusCode, Json<CreativeNote>)> {
    if let Some(category) = input.category.as_deref() {
        validate_category(category).map_err(CoreError::validation)?;
    }
    if let Some(title) = input.title.as_deref() {
        validate_note_title(title).map_err(CoreError::validation)?;
    }
    validate_note_content(&input.content).map_err(CoreError::validation)?;
    validate_media_urls(&input.media_urls).map_err(CoreError::validation)?;

    let note = CreativeNoteRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/v1/notes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CreativeNote>> {
    let note = find_owned(&state, id, user.user_id).await?;
    Ok(Json(note))
}

/// PUT /api/v1/notes/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCreativeNote>,
) -> AppResult<Json<CreativeNote>> {
    if let Some(category) = input.category.as_deref() {
        validate_category(category).map_err(CoreError::validation)?;
    }
    if let Some(title) = input.title.as_deref() {
        validate_note_title(title).map_err(CoreError::validation)?;
    }
    if let Some(content) = input.content.as_deref() {
        validate_note_content(content).map_err(CoreError::validation)?;
    }
    if let Some(urls) = input.media_urls.as_deref() {
        validate_media_urls(urls).map_err(CoreError::validation)?;
    }

    let note = CreativeNoteRepo::update(&state.pool, id, user.user_id, &input)
        .await?
        .ok_or(AppError::not_found("Note", id))?;
    Ok(Json(note))
}

/// DELETE /api/v1/notes/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CreativeNoteRepo::delete(&state.pool, id, user.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Note", id))
    }
}

/// POST /api/v1/notes/{id}/toggle-pin
pub async fn toggle_pin(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CreativeNote>> {
    let note = CreativeNoteRepo::toggle_pin(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::not_found("Note", id))?;
    Ok(Json(note))
}

/// PUT /api/v1/notes/reorder
///
/// Assigns `sort_order` by position. Every id must belong to the caller,
/// otherwise nothing changes and the request is rejected.
pub async fn reorder(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ReorderRequest>,
) -> AppResult<StatusCode> {
    validate_reorder(&input.note_ids).map_err(CoreError::validation)?;
    if !CreativeNoteRepo::reorder(&state.pool, user.user_id, &input.note_ids).await? {
        return Err(AppError::Core(CoreError::Validation(
            "note_ids must only contain your own notes".into(),
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notes/{id}/share
///
/// Submit a note to the community for review. A rejected submission is
/// moved back to `pending`; a pending or approved one is a conflict.
pub async fn share(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ShareRequest>,
) -> AppResult<(StatusCode, Json<SharedContent>)> {
    let caption = input
        .caption
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    if let Some(caption) = caption {
        validate_caption(caption).map_err(CoreError::validation)?;
    }

    let note = find_owned(&state, id, user.user_id).await?;

    let Some(existing) = SharedContentRepo::find_by_note(&state.pool, note.id).await? else {
        let shared = SharedContentRepo::create(&state.pool, note.id, user.user_id, caption).await?;
        tracing::info!(note_id = note.id, shared_id = shared.id, "Note submitted to community");
        return Ok((StatusCode::CREATED, Json(shared)));
    };

    validate_transition(&existing.status, SUBMISSION_PENDING)
        .map_err(|e| AppError::Core(CoreError::Conflict(e)))?;

    let shared = SharedContentRepo::transition(
        &state.pool,
        existing.id,
        SUBMISSION_REJECTED,
        SUBMISSION_PENDING,
        None,
        caption,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Submission was reviewed while resubmitting".into(),
        ))
    })?;
    tracing::info!(note_id = note.id, shared_id = shared.id, "Note resubmitted to community");
    Ok((StatusCode::OK, Json(shared)))
}

async fn find_owned(state: &AppState, id: DbId, user_id: DbId) -> AppResult<CreativeNote> {
    CreativeNoteRepo::find_for_user(&state.pool, id, user_id)
        .await?
        .ok_or(AppError::not_found("Note", id))
}
