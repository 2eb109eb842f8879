//! Repository for `studio_artists` (studio roster links).

use box_core::types::DbId;
use sqlx::PgPool;

use crate::models::studio::{RosterEntry, StudioArtist, StudioLink, LINK_ACCEPTED, LINK_PENDING};

const COLUMNS: &str = "id, studio_id, artist_id, status, created_at, updated_at";

pub struct StudioArtistRepo;

impl StudioArtistRepo {
    /// Create a pending invitation from `studio_id` to `artist_id`.
    ///
    /// A second invite for the same pair violates `uq_studio_artists_pair`.
    pub async fn invite(
        pool: &PgPool,
        studio_id: DbId,
        artist_id: DbId,
    ) -> Result<StudioArtist, sqlx::Error> {
        let query = format!(
            "INSERT INTO studio_artists (studio_id, artist_id, status) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudioArtist>(&query)
            .bind(studio_id)
            .bind(artist_id)
            .bind(LINK_PENDING)
            .fetch_one(pool)
            .await
    }

    /// A studio's roster (pending and accepted), newest first.
    pub async fn roster_for_studio(
        pool: &PgPool,
        studio_id: DbId,
    ) -> Result<Vec<RosterEntry>, sqlx::Error> {
        sqlx::query_as::<_, RosterEntry>(
            "SELECT sa.id, sa.artist_id, u.display_name, u.email, u.box_code, sa.status, \
                    (SELECT COUNT(*) FROM projects p WHERE p.user_id = sa.artist_id) \
                        AS project_count, \
                    sa.created_at \
             FROM studio_artists sa JOIN users u ON u.id = sa.artist_id \
             WHERE sa.studio_id = $1 \
             ORDER BY sa.created_at DESC, sa.id DESC",
        )
        .bind(studio_id)
        .fetch_all(pool)
        .await
    }

    /// Links seen from the artist side, filtered by status.
    pub async fn links_for_artist(
        pool: &PgPool,
        artist_id: DbId,
        status: &str,
    ) -> Result<Vec<StudioLink>, sqlx::Error> {
        sqlx::query_as::<_, StudioLink>(
            "SELECT sa.id, sa.studio_id, u.display_name AS studio_name, sa.status, sa.created_at \
             FROM studio_artists sa JOIN users u ON u.id = sa.studio_id \
             WHERE sa.artist_id = $1 AND sa.status = $2 \
             ORDER BY sa.created_at DESC, sa.id DESC",
        )
        .bind(artist_id)
        .bind(status)
        .fetch_all(pool)
        .await
    }

    pub async fn find_link(
        pool: &PgPool,
        studio_id: DbId,
        artist_id: DbId,
    ) -> Result<Option<StudioArtist>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM studio_artists WHERE studio_id = $1 AND artist_id = $2"
        );
        sqlx::query_as::<_, StudioArtist>(&query)
            .bind(studio_id)
            .bind(artist_id)
            .fetch_optional(pool)
            .await
    }

    /// `true` when the studio has an accepted link to the artist.
    pub async fn is_accepted(
        pool: &PgPool,
        studio_id: DbId,
        artist_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM studio_artists \
             WHERE studio_id = $1 AND artist_id = $2 AND status = $3)",
        )
        .bind(studio_id)
        .bind(artist_id)
        .bind(LINK_ACCEPTED)
        .fetch_one(pool)
        .await
    }

    /// Accept a pending invitation addressed to `artist_id`.
    pub async fn accept(
        pool: &PgPool,
        id: DbId,
        artist_id: DbId,
    ) -> Result<Option<StudioArtist>, sqlx::Error> {
        let query = format!(
            "UPDATE studio_artists SET status = $3 \
             WHERE id = $1 AND artist_id = $2 AND status = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudioArtist>(&query)
            .bind(id)
            .bind(artist_id)
            .bind(LINK_ACCEPTED)
            .bind(LINK_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Decline (delete) a pending invitation addressed to `artist_id`.
    pub async fn decline(pool: &PgPool, id: DbId, artist_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM studio_artists WHERE id = $1 AND artist_id = $2 AND status = $3",
        )
        .bind(id)
        .bind(artist_id)
        .bind(LINK_PENDING)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove an artist from a studio's roster, whatever the link status.
    pub async fn remove(pool: &PgPool, studio_id: DbId, artist_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM studio_artists WHERE studio_id = $1 AND artist_id = $2")
                .bind(studio_id)
                .bind(artist_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
