//! Repository for the `creative_notes` table.

use box_core::notes::DEFAULT_CATEGORY;
use box_core::types::DbId;
use sqlx::PgPool;

use crate::models::creative_note::{CreateCreativeNote, CreativeNote, UpdateCreativeNote};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, category, title, content, media_urls, is_pinned, \
                        sort_order, created_at, updated_at";

/// Provides CRUD operations for creative notes.
pub struct CreativeNoteRepo;

impl CreativeNoteRepo {
    /// Insert a new note at the end of the user's ordering.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCreativeNote,
    ) -> Result<CreativeNote, sqlx::Error> {
        let query = format!(
            "INSERT INTO creative_notes \
                (user_id, category, title, content, media_urls, is_pinned, sort_order) \
             VALUES ($1, COALESCE($2, $3), $4, $5, $6, $7, \
                (SELECT COALESCE(MAX(sort_order), -1) + 1 FROM creative_notes WHERE user_id = $1)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CreativeNote>(&query)
            .bind(user_id)
            .bind(&input.category)
            .bind(DEFAULT_CATEGORY)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.media_urls)
            .bind(input.is_pinned)
            .fetch_one(pool)
            .await
    }

    /// Find a note by ID, only if it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<CreativeNote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM creative_notes WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, CreativeNote>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's notes, optionally narrowed to one category.
    ///
    /// Rows come back in display order; callers may re-sort with
    /// `box_core::notes::sort_notes`, which applies the same rule.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        category: Option<&str>,
    ) -> Result<Vec<CreativeNote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM creative_notes \
             WHERE user_id = $1 AND ($2::TEXT IS NULL OR category = $2) \
             ORDER BY is_pinned DESC, sort_order ASC, updated_at DESC"
        );
        sqlx::query_as::<_, CreativeNote>(&query)
            .bind(user_id)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Partial update. Returns `None` if the note is missing or not owned.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateCreativeNote,
    ) -> Result<Option<CreativeNote>, sqlx::Error> {
        let query = format!(
            "UPDATE creative_notes SET \
                category   = COALESCE($3, category), \
                title      = COALESCE($4, title), \
                content    = COALESCE($5, content), \
                media_urls = COALESCE($6, media_urls), \
                is_pinned  = COALESCE($7, is_pinned) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CreativeNote>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.category)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.media_urls)
            .bind(input.is_pinned)
            .fetch_optional(pool)
            .await
    }

    /// Flip `is_pinned`.
    pub async fn toggle_pin(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<CreativeNote>, sqlx::Error> {
        let query = format!(
            "UPDATE creative_notes SET is_pinned = NOT is_pinned \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CreativeNote>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM creative_notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Assign `sort_order` by position in `note_ids` (0-based).
    ///
    /// Runs in a transaction and rolls back unless every id belongs to
    /// `user_id`. Returns `false` in that case.
    pub async fn reorder(
        pool: &PgPool,
        user_id: DbId,
        note_ids: &[DbId],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE creative_notes AS n SET sort_order = (o.position - 1)::INTEGER \
             FROM UNNEST($2::BIGINT[]) WITH ORDINALITY AS o(id, position) \
             WHERE n.id = o.id AND n.user_id = $1",
        )
        .bind(user_id)
        .bind(note_ids)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() != note_ids.len() as u64 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM creative_notes")
            .fetch_one(pool)
            .await
    }
}
