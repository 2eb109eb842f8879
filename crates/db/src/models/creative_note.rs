//! Creative note (idea journal) model and DTOs.

use box_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CreativeNote {
    pub id: DbId,
    pub user_id: DbId,
    pub category: String,
    pub title: Option<String>,
    pub content: String,
    pub media_urls: Vec<String>,
    pub is_pinned: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCreativeNote {
    /// Defaults to `idea` if omitted.
    pub category: Option<String>,
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub is_pinned: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCreativeNote {
    pub category: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    /// Replaces the whole list when present.
    pub media_urls: Option<Vec<String>>,
    pub is_pinned: Option<bool>,
}
