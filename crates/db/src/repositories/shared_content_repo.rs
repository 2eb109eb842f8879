//! Repository for `shared_content` (community submissions) and the
//! community feed.

use box_core::community::SUBMISSION_APPROVED;
use box_core::types::DbId;
use sqlx::PgPool;

use crate::models::community::{FeedItem, SharedContent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, note_id, user_id, caption, status, review_reason, reviewed_at, \
                        created_at, updated_at";

/// Feed projection: submission joined with note, author, and counts.
/// `$1` is always the viewing user.
const FEED_SELECT: &str = "SELECT s.id, s.note_id, s.user_id, u.display_name AS author_name, \
        s.caption, s.status, s.review_reason, \
        n.category AS note_category, n.title AS note_title, n.content AS note_content, \
        n.media_urls, \
        (SELECT COUNT(*) FROM community_favorites f WHERE f.shared_content_id = s.id) \
            AS favorite_count, \
        (SELECT COUNT(*) FROM community_comments c WHERE c.shared_content_id = s.id) \
            AS comment_count, \
        EXISTS (SELECT 1 FROM community_favorites f \
                WHERE f.shared_content_id = s.id AND f.user_id = $1) AS favorited_by_me, \
        s.created_at \
    FROM shared_content s \
    JOIN creative_notes n ON n.id = s.note_id \
    JOIN users u ON u.id = s.user_id";

pub struct SharedContentRepo;

impl SharedContentRepo {
    /// Submit a note to the community in `pending` state.
    pub async fn create(
        pool: &PgPool,
        note_id: DbId,
        user_id: DbId,
        caption: Option<&str>,
    ) -> Result<SharedContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO shared_content (note_id, user_id, caption) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SharedContent>(&query)
            .bind(note_id)
            .bind(user_id)
            .bind(caption)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SharedContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shared_content WHERE id = $1");
        sqlx::query_as::<_, SharedContent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_note(
        pool: &PgPool,
        note_id: DbId,
    ) -> Result<Option<SharedContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shared_content WHERE note_id = $1");
        sqlx::query_as::<_, SharedContent>(&query)
            .bind(note_id)
            .fetch_optional(pool)
            .await
    }

    /// Move a submission from `from` to `to`.
    ///
    /// The `WHERE status = from` guard makes concurrent reviews safe: the
    /// loser gets `None`. `reason` is stored on rejection and cleared
    /// otherwise; `reviewed_at` is set for admin decisions and cleared on
    /// resubmission.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
        reason: Option<&str>,
        caption: Option<&str>,
    ) -> Result<Option<SharedContent>, sqlx::Error> {
        let query = format!(
            "UPDATE shared_content SET \
                status = $3, \
                review_reason = $4, \
                caption = COALESCE($5, caption), \
                reviewed_at = CASE WHEN $3 = 'pending' THEN NULL ELSE NOW() END \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SharedContent>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .bind(reason)
            .bind(caption)
            .fetch_optional(pool)
            .await
    }

    /// Submissions in one status, oldest first (review queue order).
    pub async fn list_by_status(
        pool: &PgPool,
        viewer_id: DbId,
        status: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FeedItem>, sqlx::Error> {
        let query = format!(
            "{FEED_SELECT} WHERE s.status = $2 ORDER BY s.created_at ASC, s.id ASC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, FeedItem>(&query)
            .bind(viewer_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// All of a user's submissions regardless of status, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<FeedItem>, sqlx::Error> {
        let query = format!("{FEED_SELECT} WHERE s.user_id = $1 ORDER BY s.created_at DESC, s.id DESC");
        sqlx::query_as::<_, FeedItem>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The public feed: approved submissions, newest first.
    pub async fn feed(
        pool: &PgPool,
        viewer_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FeedItem>, sqlx::Error> {
        let query = format!(
            "{FEED_SELECT} WHERE s.status = $2 ORDER BY s.created_at DESC, s.id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, FeedItem>(&query)
            .bind(viewer_id)
            .bind(SUBMISSION_APPROVED)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// A single feed item in any status. Visibility is decided by the caller.
    pub async fn feed_item(
        pool: &PgPool,
        id: DbId,
        viewer_id: DbId,
    ) -> Result<Option<FeedItem>, sqlx::Error> {
        let query = format!("{FEED_SELECT} WHERE s.id = $2");
        sqlx::query_as::<_, FeedItem>(&query)
            .bind(viewer_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count_by_status(pool: &PgPool, status: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM shared_content WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await
    }
}
