//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- session JWTs and the `box_session` cookie.

pub mod password;
pub mod session;
