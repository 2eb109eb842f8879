//! Electronic press kit (EPK) rules: public slugs, media links, and
//! contact links.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maximum slug length.
pub const MAX_SLUG_LENGTH: usize = 60;

/// Slug used when the artist name has no usable characters.
pub const FALLBACK_SLUG: &str = "artist";

/// How many suffixed slugs (`name-2`, `name-3`, ...) are tried before giving up.
pub const MAX_SLUG_ATTEMPTS: u32 = 50;

/// Maximum number of media links on a kit.
pub const MAX_MEDIA_LINKS: usize = 30;

pub const MAX_SHORT_BIO_LENGTH: usize = 500;
pub const MAX_LONG_BIO_LENGTH: usize = 10_000;
pub const MAX_ARTIST_NAME_LENGTH: usize = 120;

pub const MEDIA_KIND_AUDIO: &str = "audio";
pub const MEDIA_KIND_VIDEO: &str = "video";
pub const MEDIA_KIND_IMAGE: &str = "image";
pub const MEDIA_KIND_PRESS: &str = "press";
pub const MEDIA_KIND_OTHER: &str = "other";

pub const VALID_MEDIA_KINDS: &[&str] = &[
    MEDIA_KIND_AUDIO,
    MEDIA_KIND_VIDEO,
    MEDIA_KIND_IMAGE,
    MEDIA_KIND_PRESS,
    MEDIA_KIND_OTHER,
];

/// One entry of a press kit's `media_links` JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaLink {
    pub label: String,
    pub url: String,
    #[serde(default = "default_media_kind")]
    pub kind: String,
}

fn default_media_kind() -> String {
    MEDIA_KIND_OTHER.to_string()
}

/// Derive a URL slug from an artist name.
///
/// Lowercases ASCII letters and digits and turns every other run of
/// characters into a single hyphen. The result never starts or ends with a
/// hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() {
            pending_hyphen = true;
            continue;
        }
        let hyphen = pending_hyphen && !slug.is_empty();
        if slug.len() + usize::from(hyphen) + 1 > MAX_SLUG_LENGTH {
            break;
        }
        if hyphen {
            slug.push('-');
        }
        pending_hyphen = false;
        slug.push(c.to_ascii_lowercase());
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Slug to try on the given attempt: the base itself first, then `base-2`,
/// `base-3`, and so on.
pub fn slug_candidate(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        base.to_string()
    } else {
        let suffix = format!("-{attempt}");
        let keep = MAX_SLUG_LENGTH.saturating_sub(suffix.len()).min(base.len());
        format!("{}{suffix}", base[..keep].trim_end_matches('-'))
    }
}

/// Public links must be absolute `http(s)` URLs.
pub fn validate_link_url(url: &str) -> Result<(), String> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(format!("Link '{url}' must start with http:// or https://"))
    }
}

pub fn validate_media_links(links: &[MediaLink]) -> Result<(), String> {
    if links.len() > MAX_MEDIA_LINKS {
        return Err(format!(
            "A press kit may have at most {MAX_MEDIA_LINKS} media links"
        ));
    }
    for link in links {
        if link.label.trim().is_empty() {
            return Err("Media link label cannot be empty".to_string());
        }
        if !VALID_MEDIA_KINDS.contains(&link.kind.as_str()) {
            return Err(format!(
                "Invalid media kind '{}'. Must be one of: {}",
                link.kind,
                VALID_MEDIA_KINDS.join(", ")
            ));
        }
        // Uploaded files are served from this host.
        if !link.url.starts_with("/files/") {
            validate_link_url(&link.url)?;
        }
    }
    Ok(())
}

/// Social links are a `platform -> url` map.
pub fn validate_social_links(links: &BTreeMap<String, String>) -> Result<(), String> {
    for (platform, url) in links {
        if platform.trim().is_empty() {
            return Err("Social link platform cannot be empty".to_string());
        }
        validate_link_url(url)?;
    }
    Ok(())
}

pub fn validate_artist_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Artist name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_ARTIST_NAME_LENGTH {
        return Err(format!(
            "Artist name exceeds maximum length of {MAX_ARTIST_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

pub fn validate_bios(short_bio: Option<&str>, long_bio: Option<&str>) -> Result<(), String> {
    if short_bio.is_some_and(|b| b.chars().count() > MAX_SHORT_BIO_LENGTH) {
        return Err(format!(
            "Short bio exceeds maximum length of {MAX_SHORT_BIO_LENGTH} characters"
        ));
    }
    if long_bio.is_some_and(|b| b.chars().count() > MAX_LONG_BIO_LENGTH) {
        return Err(format!(
            "Long bio exceeds maximum length of {MAX_LONG_BIO_LENGTH} characters"
        ));
    }
    Ok(())
}
