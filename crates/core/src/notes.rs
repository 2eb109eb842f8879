//! Creative note (idea journal) constants and validation.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::types::{DbId, Timestamp};

/// Maximum length of note content in characters.
pub const MAX_NOTE_CONTENT_LENGTH: usize = 20_000;

/// Maximum length of an optional note title.
pub const MAX_NOTE_TITLE_LENGTH: usize = 200;

/// Maximum number of media URLs attached to a single note.
pub const MAX_MEDIA_URLS: usize = 20;

pub const CATEGORY_IDEA: &str = "idea";
pub const CATEGORY_LYRIC: &str = "lyric";
pub const CATEGORY_MELODY: &str = "melody";
pub const CATEGORY_PRODUCTION: &str = "production";
pub const CATEGORY_BUSINESS: &str = "business";
pub const CATEGORY_OTHER: &str = "other";

pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_IDEA,
    CATEGORY_LYRIC,
    CATEGORY_MELODY,
    CATEGORY_PRODUCTION,
    CATEGORY_BUSINESS,
    CATEGORY_OTHER,
];

/// Category used when a note is created without one.
pub const DEFAULT_CATEGORY: &str = CATEGORY_IDEA;

pub fn validate_category(category: &str) -> Result<(), String> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(format!(
            "Invalid note category '{category}'. Must be one of: {}",
            VALID_CATEGORIES.join(", ")
        ))
    }
}

/// Note content must be non-empty and within the length limit.
pub fn validate_note_content(content: &str) -> Result<(), String> {
    if content.trim().is_empty() {
        return Err("Note content cannot be empty".to_string());
    }
    if content.chars().count() > MAX_NOTE_CONTENT_LENGTH {
        return Err(format!(
            "Note content exceeds maximum length of {MAX_NOTE_CONTENT_LENGTH} characters"
        ));
    }
    Ok(())
}

pub fn validate_note_title(title: &str) -> Result<(), String> {
    if title.chars().count() > MAX_NOTE_TITLE_LENGTH {
        return Err(format!(
            "Note title exceeds maximum length of {MAX_NOTE_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Media URLs are either absolute `http(s)` links or paths to files
/// uploaded through this server (`/files/...`).
pub fn validate_media_urls(urls: &[String]) -> Result<(), String> {
    if urls.len() > MAX_MEDIA_URLS {
        return Err(format!(
            "A note may reference at most {MAX_MEDIA_URLS} media URLs"
        ));
    }
    for url in urls {
        let ok = url.starts_with("https://")
            || url.starts_with("http://")
            || url.starts_with("/files/");
        if !ok {
            return Err(format!(
                "Media URL '{url}' must start with http://, https:// or /files/"
            ));
        }
    }
    Ok(())
}

/// A reorder request lists the caller's note ids in their new order.
///
/// Ids must be unique; ownership is checked against the database.
pub fn validate_reorder(note_ids: &[DbId]) -> Result<(), String> {
    if note_ids.is_empty() {
        return Err("note_ids cannot be empty".to_string());
    }
    let mut seen = HashSet::with_capacity(note_ids.len());
    for id in note_ids {
        if !seen.insert(*id) {
            return Err(format!("Note id {id} appears more than once"));
        }
    }
    Ok(())
}

/// Fields that decide where a note appears in the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteOrderKey {
    pub is_pinned: bool,
    pub sort_order: i32,
    pub updated_at: Timestamp,
}

/// Sort notes for display: pinned first, then by `sort_order` ascending,
/// then most recently updated.
pub fn sort_notes<T>(notes: &mut [T], key: impl Fn(&T) -> NoteOrderKey) {
    notes.sort_by_key(|note| {
        let k = key(note);
        (Reverse(k.is_pinned), k.sort_order, Reverse(k.updated_at))
    });
}
