//! Domain rules for BOX.
//!
//! Everything here is pure: constants, validation functions, and the
//! string-templating generators for royalty exports and legal documents.
//! The `db` and `api` crates depend on this crate; it depends on neither.

pub mod box_code;
pub mod community;
pub mod error;
pub mod hashing;
pub mod legal_templates;
pub mod metadata;
pub mod notes;
pub mod pagination;
pub mod press_kit;
pub mod project_status;
pub mod roles;
pub mod royalty_export;
pub mod tokens;
pub mod types;
pub mod upload;
