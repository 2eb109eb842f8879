//! Project entity model and DTOs.

use box_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    /// Free-form metadata bag (ISRC, UPC, ISWC, writers, publishers, ...).
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. The owner comes from the session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `concept` if omitted.
    pub status: Option<String>,
    /// Defaults to `{}` if omitted.
    pub metadata: Option<serde_json::Value>,
}

/// DTO for updating an existing project. All fields are optional.
///
/// `metadata`, when present, replaces the whole bag.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Filters for listing a user's projects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub status: Option<String>,
    /// Case-insensitive title substring.
    pub q: Option<String>,
}
