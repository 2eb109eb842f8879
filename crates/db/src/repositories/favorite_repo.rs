//! Repository for `community_favorites`.

use box_core::types::DbId;
use sqlx::PgPool;

pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Favorite an item. Idempotent: returns `false` if it was already favorited.
    pub async fn add(pool: &PgPool, content_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO community_favorites (shared_content_id, user_id) VALUES ($1, $2) \
             ON CONFLICT (shared_content_id, user_id) DO NOTHING",
        )
        .bind(content_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a favorite. Returns `false` if there was nothing to remove.
    pub async fn remove(pool: &PgPool, content_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM community_favorites WHERE shared_content_id = $1 AND user_id = $2",
        )
        .bind(content_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
