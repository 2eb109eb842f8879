//! Repository for the `email_verifications` table.

use box_core::types::DbId;
use sqlx::PgPool;

use crate::models::email_verification::{CreateEmailVerification, EmailVerification};

const COLUMNS: &str = "id, user_id, token_hash, expires_at, consumed_at, created_at";

pub struct EmailVerificationRepo;

impl EmailVerificationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateEmailVerification,
    ) -> Result<EmailVerification, sqlx::Error> {
        let query = format!(
            "INSERT INTO email_verifications (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmailVerification>(&query)
            .bind(input.user_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Atomically consume an unexpired, unused token.
    ///
    /// Returns the consumed row, or `None` when the token is unknown,
    /// expired, or was already used.
    pub async fn consume(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<EmailVerification>, sqlx::Error> {
        let query = format!(
            "UPDATE email_verifications SET consumed_at = NOW()
             WHERE token_hash = $1 AND consumed_at IS NULL AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmailVerification>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Invalidate any outstanding tokens for a user (used before issuing a new one).
    pub async fn invalidate_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE email_verifications SET consumed_at = NOW()
             WHERE user_id = $1 AND consumed_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
