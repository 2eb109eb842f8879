//! Press kit (EPK) model and DTOs.

use std::collections::BTreeMap;

use box_core::press_kit::MediaLink;
use box_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PressKit {
    pub id: DbId,
    pub user_id: DbId,
    pub slug: String,
    pub artist_name: String,
    pub tagline: Option<String>,
    pub short_bio: Option<String>,
    pub long_bio: Option<String>,
    pub genres: Vec<String>,
    pub media_links: Json<Vec<MediaLink>>,
    pub contact_email: Option<String>,
    pub booking_email: Option<String>,
    pub website: Option<String>,
    pub social_links: Json<BTreeMap<String, String>>,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full replacement of a press kit's editable fields.
///
/// The slug and publish state are managed by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertPressKit {
    pub artist_name: String,
    pub tagline: Option<String>,
    pub short_bio: Option<String>,
    pub long_bio: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub media_links: Vec<MediaLink>,
    pub contact_email: Option<String>,
    pub booking_email: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub social_links: BTreeMap<String, String>,
}
