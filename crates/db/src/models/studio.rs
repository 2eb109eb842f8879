//! Studio roster models (`studio_artists`).

use box_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

pub const LINK_PENDING: &str = "pending";
pub const LINK_ACCEPTED: &str = "accepted";

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudioArtist {
    pub id: DbId,
    pub studio_id: DbId,
    pub artist_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A roster link seen from the studio side, with the artist's profile.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RosterEntry {
    pub id: DbId,
    pub artist_id: DbId,
    pub display_name: String,
    pub email: String,
    pub box_code: String,
    pub status: String,
    pub project_count: i64,
    pub created_at: Timestamp,
}

/// A roster link seen from the artist side, with the studio's profile.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudioLink {
    pub id: DbId,
    pub studio_id: DbId,
    pub studio_name: String,
    pub status: String,
    pub created_at: Timestamp,
}
