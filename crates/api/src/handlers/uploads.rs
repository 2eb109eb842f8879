//! Upload passthrough: presigned URLs and the signed `PUT` endpoint that
//! streams a file body to local disk.

use std::path::PathBuf;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use box_core::error::CoreError;
use box_core::types::{DbId, Timestamp};
use box_core::upload::{
    sign_upload, storage_key, validate_content_type, validate_storage_key,
    verify_upload_signature,
};
use box_db::models::upload::{CreateUpload, Upload, UPLOAD_COMPLETE};
use box_db::repositories::UploadRepo;
use chrono::{Duration, Utc};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use validator::Validate;

use crate::config::UploadConfig;
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct PresignRequest {
    #[validate(length(min = 1, max = 255, message = "filename must be 1-255 characters"))]
    pub filename: String,
    pub content_type: String,
}

#[derive(Debug, Serialize)]
pub struct PresignResponse {
    pub upload_id: DbId,
    pub upload_url: String,
    pub method: &'static str,
    pub expires_at: Timestamp,
    /// Where the file is served once the upload completes.
    pub file_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SignedUploadQuery {
    pub expires: i64,
    pub signature: String,
}

/// POST /api/v1/uploads/presign
pub async fn presign(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<PresignRequest>,
) -> AppResult<Json<PresignResponse>> {
    input.validate()?;
    let content_type = input.content_type.trim().to_ascii_lowercase();
    validate_content_type(&content_type).map_err(CoreError::validation)?;

    let key = storage_key(user.user_id, &input.filename);
    let upload = UploadRepo::create(
        &state.pool,
        &CreateUpload {
            user_id: user.user_id,
            storage_key: key.clone(),
            original_filename: input.filename.clone(),
            content_type,
        },
    )
    .await?;

    let expires_at = Utc::now() + Duration::seconds(state.config.upload.url_ttl_secs);
    let expires = expires_at.timestamp();
    let signature = sign_upload(&state.config.session.secret, &key, expires);

    tracing::debug!(upload_id = upload.id, key = %key, "Issued upload URL");

    Ok(Json(PresignResponse {
        upload_id: upload.id,
        upload_url: format!(
            "{}/api/v1/uploads/{key}?expires={expires}&signature={signature}",
            state.config.public_base_url
        ),
        method: "PUT",
        expires_at,
        file_url: format!("/files/{key}"),
    }))
}

/// PUT /api/v1/uploads/{user_id}/{file}?expires=&signature=
///
/// Authorized by the URL signature rather than a session. The body is
/// staged as a `.part` file outside the served directory and moved into
/// place once complete.
pub async fn receive(
    State(state): State<AppState>,
    Path((owner_id, file)): Path<(DbId, String)>,
    Query(query): Query<SignedUploadQuery>,
    body: Body,
) -> AppResult<Json<Upload>> {
    let key = format!("{owner_id}/{file}");
    validate_storage_key(&key).map_err(CoreError::validation)?;
    verify_upload_signature(
        &state.config.session.secret,
        &key,
        query.expires,
        &query.signature,
        Utc::now().timestamp(),
    )
    .map_err(|e| AppError::Core(CoreError::Forbidden(e.to_string())))?;

    let upload = UploadRepo::find_by_key(&state.pool, &key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No upload registered for '{key}'")))?;
    if upload.status == UPLOAD_COMPLETE {
        return Err(already_complete());
    }

    let size = write_body(body, &state.config.upload, &key).await?;

    let upload = UploadRepo::mark_complete(&state.pool, &key, size as i64)
        .await?
        .ok_or_else(already_complete)?;

    tracing::info!(upload_id = upload.id, size_bytes = size, "Upload complete");
    Ok(Json(upload))
}

fn already_complete() -> AppError {
    AppError::Core(CoreError::Conflict("Upload has already been completed".into()))
}

fn io_error(e: std::io::Error) -> AppError {
    AppError::InternalError(format!("Upload storage error: {e}"))
}

/// Staged upload body, removed on drop unless [`persist`](Self::persist)
/// was called. The drop also runs when the request future is cancelled
/// mid-stream by the timeout layer or a client disconnect.
struct PartialUpload {
    path: PathBuf,
    keep: bool,
}

impl PartialUpload {
    fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    fn persist(mut self) {
        self.keep = true;
    }
}

impl Drop for PartialUpload {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Discarded partial upload");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Failed to remove partial upload");
            }
        }
    }
}

/// Stream `body` into the staging directory, then move it to its final
/// place under the served upload directory. Returns the bytes written.
async fn write_body(body: Body, config: &UploadConfig, key: &str) -> AppResult<u64> {
    let dest = config.dir.join(key);
    let part = config.staging_dir.join(format!("{key}.part"));
    for dir in [dest.parent(), part.parent()].into_iter().flatten() {
        tokio::fs::create_dir_all(dir).await.map_err(io_error)?;
    }

    let guard = PartialUpload::new(part);
    let size = stream_to_file(body, &guard.path, config.max_bytes).await?;
    tokio::fs::rename(&guard.path, &dest).await.map_err(io_error)?;
    guard.persist();
    Ok(size)
}

async fn stream_to_file(body: Body, path: &std::path::Path, max_bytes: u64) -> AppResult<u64> {
    let mut file = tokio::fs::File::create(path).await.map_err(io_error)?;
    let mut stream = body.into_data_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk =
            chunk.map_err(|e| AppError::BadRequest(format!("Failed to read upload body: {e}")))?;
        written += chunk.len() as u64;
        if written > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Upload exceeds the {max_bytes} byte limit"
            )));
        }
        file.write_all(&chunk).await.map_err(io_error)?;
    }

    file.flush().await.map_err(io_error)?;
    Ok(written)
}
