//! Project lifecycle status values.
//!
//! A project moves through `concept -> development -> review -> published`,
//! but the owner may set any value directly; the status is a label, not a
//! gate.

pub const STATUS_CONCEPT: &str = "concept";
pub const STATUS_DEVELOPMENT: &str = "development";
pub const STATUS_REVIEW: &str = "review";
pub const STATUS_PUBLISHED: &str = "published";

/// All statuses in lifecycle order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_CONCEPT,
    STATUS_DEVELOPMENT,
    STATUS_REVIEW,
    STATUS_PUBLISHED,
];

/// Status assigned to new projects when the client does not send one.
pub const DEFAULT_STATUS: &str = STATUS_CONCEPT;

/// Maximum length of a project title.
pub const MAX_TITLE_LENGTH: usize = 200;

pub fn validate_status(status: &str) -> Result<(), String> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid project status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        ))
    }
}

pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Project title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Project title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

/// The metadata bag must be a JSON object; its contents are otherwise opaque.
pub fn validate_metadata(metadata: &serde_json::Value) -> Result<(), String> {
    if metadata.is_object() {
        Ok(())
    } else {
        Err("Project metadata must be a JSON object".to_string())
    }
}
