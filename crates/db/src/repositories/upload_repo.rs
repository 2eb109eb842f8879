//! Repository for the `uploads` table.

use sqlx::PgPool;

use crate::models::upload::{CreateUpload, Upload, UPLOAD_COMPLETE, UPLOAD_PENDING};

const COLUMNS: &str = "id, user_id, storage_key, original_filename, content_type, size_bytes, \
                        status, created_at, completed_at";

pub struct UploadRepo;

impl UploadRepo {
    /// Record a presigned upload in `pending` state.
    pub async fn create(pool: &PgPool, input: &CreateUpload) -> Result<Upload, sqlx::Error> {
        let query = format!(
            "INSERT INTO uploads (user_id, storage_key, original_filename, content_type, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Upload>(&query)
            .bind(input.user_id)
            .bind(&input.storage_key)
            .bind(&input.original_filename)
            .bind(&input.content_type)
            .bind(UPLOAD_PENDING)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_key(pool: &PgPool, storage_key: &str) -> Result<Option<Upload>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM uploads WHERE storage_key = $1");
        sqlx::query_as::<_, Upload>(&query)
            .bind(storage_key)
            .fetch_optional(pool)
            .await
    }

    /// Mark a pending upload complete with its final size.
    ///
    /// Returns `None` if the upload was already completed.
    pub async fn mark_complete(
        pool: &PgPool,
        storage_key: &str,
        size_bytes: i64,
    ) -> Result<Option<Upload>, sqlx::Error> {
        let query = format!(
            "UPDATE uploads SET status = $3, size_bytes = $2, completed_at = NOW() \
             WHERE storage_key = $1 AND status = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Upload>(&query)
            .bind(storage_key)
            .bind(size_bytes)
            .bind(UPLOAD_COMPLETE)
            .bind(UPLOAD_PENDING)
            .fetch_optional(pool)
            .await
    }

    pub async fn count_complete(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM uploads WHERE status = $1")
            .bind(UPLOAD_COMPLETE)
            .fetch_one(pool)
            .await
    }
}
