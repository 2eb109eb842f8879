//! Email verification token rows.

use box_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct EmailVerification {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub consumed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

pub struct CreateEmailVerification {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
