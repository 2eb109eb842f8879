//! Community layer models: shared notes, favorites, and comments.

use box_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `shared_content`: one note submitted to the community.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SharedContent {
    pub id: DbId,
    pub note_id: DbId,
    pub user_id: DbId,
    pub caption: Option<String>,
    pub status: String,
    pub review_reason: Option<String>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A shared note joined with its note body, author, and social counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeedItem {
    pub id: DbId,
    pub note_id: DbId,
    pub user_id: DbId,
    pub author_name: String,
    pub caption: Option<String>,
    pub status: String,
    pub review_reason: Option<String>,
    pub note_category: String,
    pub note_title: Option<String>,
    pub note_content: String,
    pub media_urls: Vec<String>,
    pub favorite_count: i64,
    pub comment_count: i64,
    /// Whether the viewing user has favorited this item.
    pub favorited_by_me: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommunityComment {
    pub id: DbId,
    pub shared_content_id: DbId,
    pub user_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment joined with its author's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub shared_content_id: DbId,
    pub user_id: DbId,
    pub author_name: String,
    pub body: String,
    pub created_at: Timestamp,
}
