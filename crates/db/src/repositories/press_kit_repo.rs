//! Repository for the `press_kits` table.

use box_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::press_kit::{PressKit, UpsertPressKit};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, slug, artist_name, tagline, short_bio, long_bio, genres, \
                        media_links, contact_email, booking_email, website, social_links, \
                        is_published, published_at, created_at, updated_at";

/// Provides CRUD operations for press kits. A user has at most one kit.
pub struct PressKitRepo;

impl PressKitRepo {
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<PressKit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM press_kits WHERE user_id = $1");
        sqlx::query_as::<_, PressKit>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Public lookup: only published kits are returned.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<PressKit>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM press_kits WHERE slug = $1 AND is_published = true");
        sqlx::query_as::<_, PressKit>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM press_kits WHERE slug = $1)")
            .bind(slug)
            .fetch_one(pool)
            .await
    }

    /// Insert a new (unpublished) kit with the given slug.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        slug: &str,
        input: &UpsertPressKit,
    ) -> Result<PressKit, sqlx::Error> {
        let query = format!(
            "INSERT INTO press_kits \
                (user_id, slug, artist_name, tagline, short_bio, long_bio, genres, media_links, \
                 contact_email, booking_email, website, social_links) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PressKit>(&query)
            .bind(user_id)
            .bind(slug)
            .bind(&input.artist_name)
            .bind(&input.tagline)
            .bind(&input.short_bio)
            .bind(&input.long_bio)
            .bind(&input.genres)
            .bind(Json(&input.media_links))
            .bind(&input.contact_email)
            .bind(&input.booking_email)
            .bind(&input.website)
            .bind(Json(&input.social_links))
            .fetch_one(pool)
            .await
    }

    /// Replace every editable field. The slug is left unchanged.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertPressKit,
    ) -> Result<Option<PressKit>, sqlx::Error> {
        let query = format!(
            "UPDATE press_kits SET \
                artist_name = $2, tagline = $3, short_bio = $4, long_bio = $5, genres = $6, \
                media_links = $7, contact_email = $8, booking_email = $9, website = $10, \
                social_links = $11 \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PressKit>(&query)
            .bind(user_id)
            .bind(&input.artist_name)
            .bind(&input.tagline)
            .bind(&input.short_bio)
            .bind(&input.long_bio)
            .bind(&input.genres)
            .bind(Json(&input.media_links))
            .bind(&input.contact_email)
            .bind(&input.booking_email)
            .bind(&input.website)
            .bind(Json(&input.social_links))
            .fetch_optional(pool)
            .await
    }

    /// Publish or unpublish. `published_at` is stamped on the first publish
    /// after being unpublished and cleared on unpublish.
    pub async fn set_published(
        pool: &PgPool,
        user_id: DbId,
        published: bool,
    ) -> Result<Option<PressKit>, sqlx::Error> {
        let query = format!(
            "UPDATE press_kits SET \
                is_published = $2, \
                published_at = CASE \
                    WHEN $2 AND published_at IS NULL THEN NOW() \
                    WHEN $2 THEN published_at \
                    ELSE NULL END \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PressKit>(&query)
            .bind(user_id)
            .bind(published)
            .fetch_optional(pool)
            .await
    }

    pub async fn count_published(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM press_kits WHERE is_published = true")
            .fetch_one(pool)
            .await
    }
}
