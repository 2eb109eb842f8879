//! Community sharing: submission moderation states and comment rules.
//!
//! A note shared to the community starts `pending`, and an admin moves it
//! to `approved` or `rejected`. The owner may resubmit a rejected note,
//! which puts it back to `pending`.

pub const SUBMISSION_PENDING: &str = "pending";
pub const SUBMISSION_APPROVED: &str = "approved";
pub const SUBMISSION_REJECTED: &str = "rejected";

pub const VALID_SUBMISSION_STATUSES: &[&str] =
    &[SUBMISSION_PENDING, SUBMISSION_APPROVED, SUBMISSION_REJECTED];

/// Maximum length of a comment body.
pub const MAX_COMMENT_LENGTH: usize = 2_000;

/// Maximum length of a submission caption.
pub const MAX_CAPTION_LENGTH: usize = 280;

/// Maximum length of an admin rejection reason.
pub const MAX_REJECTION_REASON_LENGTH: usize = 500;

pub fn validate_submission_status(status: &str) -> Result<(), String> {
    if VALID_SUBMISSION_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid submission status '{status}'. Must be one of: {}",
            VALID_SUBMISSION_STATUSES.join(", ")
        ))
    }
}

/// Check that a submission may move from `from` to `to`.
///
/// Only `pending -> approved`, `pending -> rejected`, and
/// `rejected -> pending` are allowed.
pub fn validate_transition(from: &str, to: &str) -> Result<(), String> {
    let allowed = matches!(
        (from, to),
        (SUBMISSION_PENDING, SUBMISSION_APPROVED)
            | (SUBMISSION_PENDING, SUBMISSION_REJECTED)
            | (SUBMISSION_REJECTED, SUBMISSION_PENDING)
    );
    if allowed {
        Ok(())
    } else {
        Err(format!("Cannot move a submission from '{from}' to '{to}'"))
    }
}

pub fn validate_comment_body(body: &str) -> Result<(), String> {
    if body.trim().is_empty() {
        return Err("Comment cannot be empty".to_string());
    }
    if body.chars().count() > MAX_COMMENT_LENGTH {
        return Err(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        ));
    }
    Ok(())
}

pub fn validate_caption(caption: &str) -> Result<(), String> {
    if caption.chars().count() > MAX_CAPTION_LENGTH {
        return Err(format!(
            "Caption exceeds maximum length of {MAX_CAPTION_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Rejections must tell the author why.
pub fn validate_rejection_reason(reason: &str) -> Result<(), String> {
    if reason.trim().is_empty() {
        return Err("A rejection reason is required".to_string());
    }
    if reason.chars().count() > MAX_REJECTION_REASON_LENGTH {
        return Err(format!(
            "Rejection reason exceeds maximum length of {MAX_REJECTION_REASON_LENGTH} characters"
        ));
    }
    Ok(())
}
