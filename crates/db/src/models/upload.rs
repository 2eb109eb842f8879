//! Upload bookkeeping rows.

use box_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

pub const UPLOAD_PENDING: &str = "pending";
pub const UPLOAD_COMPLETE: &str = "complete";

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Upload {
    pub id: DbId,
    pub user_id: DbId,
    pub storage_key: String,
    pub original_filename: String,
    pub content_type: String,
    pub size_bytes: Option<i64>,
    pub status: String,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

pub struct CreateUpload {
    pub user_id: DbId,
    pub storage_key: String,
    pub original_filename: String,
    pub content_type: String,
}
