//! Admin API: platform stats, user management, and community moderation.
//!
//! Every handler takes [`RequireAdmin`], which checks the shared
//! `x-admin-secret` header.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use box_core::community::{
    validate_rejection_reason, validate_submission_status, validate_transition,
    SUBMISSION_APPROVED, SUBMISSION_PENDING, SUBMISSION_REJECTED,
};
use box_core::error::CoreError;
use box_core::types::DbId;
use box_db::models::community::{FeedItem, SharedContent};
use box_db::models::stats::DashboardStats;
use box_db::models::user::UserResponse;
use box_db::repositories::{CommentRepo, SessionRepo, SharedContentRepo, StatsRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::admin::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Viewer id used for feed queries made on behalf of the admin API.
/// No user has this id, so `favorited_by_me` is always false.
const NO_VIEWER: DbId = 0;

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

/// GET /api/v1/admin/stats
pub async fn stats(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<Json<DashboardStats>> {
    let stats = StatsRepo::dashboard(&state.pool).await?;
    Ok(Json(stats))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let (limit, offset) = params.resolve();
    let users = UserRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}

/// PUT /api/v1/admin/users/{id}/active
///
/// Deactivating an account also revokes all of its sessions.
pub async fn set_user_active(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetActiveRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::set_active(&state.pool, id, input.is_active)
        .await?
        .ok_or(AppError::not_found("User", id))?;

    if !input.is_active {
        let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;
        tracing::info!(user_id = id, revoked, "User deactivated");
    } else {
        tracing::info!(user_id = id, "User reactivated");
    }
    Ok(Json(UserResponse::from(&user)))
}

/// GET /api/v1/admin/submissions?status=
pub async fn list_submissions(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<SubmissionQuery>,
) -> AppResult<Json<DataResponse<Vec<FeedItem>>>> {
    let status = query.status.as_deref().unwrap_or(SUBMISSION_PENDING);
    validate_submission_status(status).map_err(CoreError::validation)?;

    let (limit, offset) = PaginationParams {
        limit: query.limit,
        offset: query.offset,
    }
    .resolve();
    let items =
        SharedContentRepo::list_by_status(&state.pool, NO_VIEWER, status, limit, offset).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/submissions/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<SharedContent>> {
    let content = review(&state, id, SUBMISSION_APPROVED, None).await?;
    Ok(Json(content))
}

/// POST /api/v1/admin/submissions/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<RejectRequest>,
) -> AppResult<Json<SharedContent>> {
    let reason = input.reason.trim();
    validate_rejection_reason(reason).map_err(CoreError::validation)?;
    let content = review(&state, id, SUBMISSION_REJECTED, Some(reason)).await?;
    Ok(Json(content))
}

/// DELETE /api/v1/admin/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CommentRepo::delete(&state.pool, id).await? {
        tracing::info!(comment_id = id, "Comment removed by moderator");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Comment", id))
    }
}

async fn review(
    state: &AppState,
    id: DbId,
    to: &str,
    reason: Option<&str>,
) -> AppResult<SharedContent> {
    let current = SharedContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Submission", id))?;
    validate_transition(&current.status, to).map_err(|e| AppError::Core(CoreError::Conflict(e)))?;

    // The guarded update fails if another moderator got there first.
    let content = SharedContentRepo::transition(&state.pool, id, &current.status, to, reason, None)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Submission was reviewed concurrently".into(),
            ))
        })?;

    tracing::info!(submission_id = id, status = to, "Submission reviewed");
    Ok(content)
}
