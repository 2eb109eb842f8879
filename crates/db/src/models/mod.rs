//! Row models and DTOs.
//!
//! Row structs derive `FromRow`; `Create*` / `Update*` structs are the
//! inputs accepted by the matching repository.

pub mod community;
pub mod creative_note;
pub mod email_verification;
pub mod press_kit;
pub mod project;
pub mod session;
pub mod stats;
pub mod studio;
pub mod upload;
pub mod user;
