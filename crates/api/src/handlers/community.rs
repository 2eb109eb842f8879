//! Handlers for the `/community` resource: the shared-notes feed,
//! favorites, and comments.
//!
//! Items that are not approved are visible only to their owner; everyone
//! else gets 404.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use box_core::community::{validate_comment_body, SUBMISSION_APPROVED};
use box_core::error::CoreError;
use box_core::types::DbId;
use box_db::models::community::{CommentWithAuthor, FeedItem};
use box_db::repositories::{CommentRepo, FavoriteRepo, SharedContentRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
}

/// GET /api/v1/community
pub async fn feed(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<FeedItem>>>> {
    let (limit, offset) = params.resolve();
    let items = SharedContentRepo::feed(&state.pool, user.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/community/mine
pub async fn mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<FeedItem>>>> {
    let items = SharedContentRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/community/{id}
pub async fn get_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<FeedItem>> {
    let item = visible_item(&state, id, user.user_id).await?;
    Ok(Json(item))
}

/// POST /api/v1/community/{id}/favorite
pub async fn favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    visible_item(&state, id, user.user_id).await?;
    FavoriteRepo::add(&state.pool, id, user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/community/{id}/favorite
pub async fn unfavorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    visible_item(&state, id, user.user_id).await?;
    FavoriteRepo::remove(&state.pool, id, user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/community/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CommentWithAuthor>>>> {
    visible_item(&state, id, user.user_id).await?;
    let comments = CommentRepo::list_for_content(&state.pool, id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/community/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<CommentWithAuthor>)> {
    let body = input.body.trim();
    validate_comment_body(body).map_err(CoreError::validation)?;
    visible_item(&state, id, user.user_id).await?;

    let comment = CommentRepo::create(&state.pool, id, user.user_id, body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/v1/community/{id}/comments/{comment_id}
///
/// Only the comment's author may delete it here; moderators use the admin API.
pub async fn delete_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, comment_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, comment_id)
        .await?
        .filter(|c| c.shared_content_id == id)
        .ok_or(AppError::not_found("Comment", comment_id))?;

    if comment.user_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only delete your own comments".into(),
        )));
    }

    CommentRepo::delete(&state.pool, comment.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn visible_item(state: &AppState, id: DbId, viewer_id: DbId) -> AppResult<FeedItem> {
    SharedContentRepo::feed_item(&state.pool, id, viewer_id)
        .await?
        .filter(|item| item.status == SUBMISSION_APPROVED || item.user_id == viewer_id)
        .ok_or(AppError::not_found("Shared content", id))
}
