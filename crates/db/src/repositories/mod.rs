//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod comment_repo;
pub mod creative_note_repo;
pub mod email_verification_repo;
pub mod favorite_repo;
pub mod press_kit_repo;
pub mod project_repo;
pub mod session_repo;
pub mod shared_content_repo;
pub mod stats_repo;
pub mod studio_artist_repo;
pub mod upload_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use creative_note_repo::CreativeNoteRepo;
pub use email_verification_repo::EmailVerificationRepo;
pub use favorite_repo::FavoriteRepo;
pub use press_kit_repo::PressKitRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use shared_content_repo::SharedContentRepo;
pub use stats_repo::StatsRepo;
pub use studio_artist_repo::StudioArtistRepo;
pub use upload_repo::UploadRepo;
pub use user_repo::UserRepo;
