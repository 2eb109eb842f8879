pub mod admin;
pub mod auth;
pub mod community;
pub mod documents;
pub mod export;
pub mod notes;
pub mod press_kit;
pub mod project;
pub mod studio;
pub mod uploads;
