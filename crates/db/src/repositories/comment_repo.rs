//! Repository for `community_comments`.

use box_core::types::DbId;
use sqlx::PgPool;

use crate::models::community::{CommentWithAuthor, CommunityComment};

const COLUMNS: &str = "id, shared_content_id, user_id, body, created_at, updated_at";

pub struct CommentRepo;

impl CommentRepo {
    /// Add a comment and return it with the author's display name.
    pub async fn create(
        pool: &PgPool,
        content_id: DbId,
        user_id: DbId,
        body: &str,
    ) -> Result<CommentWithAuthor, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "WITH inserted AS ( \
                INSERT INTO community_comments (shared_content_id, user_id, body) \
                VALUES ($1, $2, $3) \
                RETURNING id, shared_content_id, user_id, body, created_at \
             ) \
             SELECT i.id, i.shared_content_id, i.user_id, u.display_name AS author_name, \
                    i.body, i.created_at \
             FROM inserted i JOIN users u ON u.id = i.user_id",
        )
        .bind(content_id)
        .bind(user_id)
        .bind(body)
        .fetch_one(pool)
        .await
    }

    /// Comments on an item, oldest first.
    pub async fn list_for_content(
        pool: &PgPool,
        content_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.shared_content_id, c.user_id, u.display_name AS author_name, \
                    c.body, c.created_at \
             FROM community_comments c JOIN users u ON u.id = c.user_id \
             WHERE c.shared_content_id = $1 \
             ORDER BY c.created_at ASC, c.id ASC",
        )
        .bind(content_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CommunityComment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM community_comments WHERE id = $1");
        sqlx::query_as::<_, CommunityComment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM community_comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
