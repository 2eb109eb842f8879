//! Upload passthrough: storage keys, content-type policy, and signed
//! upload URLs.
//!
//! The client asks the API for an upload URL, then `PUT`s the file body to
//! it. The URL carries an expiry and an HMAC-SHA256 signature over the
//! method, storage key, and expiry, so the upload endpoint can accept the
//! body without a session.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::hashing::secrets_match;
use crate::types::DbId;

type HmacSha256 = Hmac<Sha256>;

/// Maximum length of the sanitized filename part of a storage key.
pub const MAX_FILENAME_LENGTH: usize = 100;

/// Length of the random component that keeps storage keys unique.
pub const KEY_NONCE_LENGTH: usize = 12;

/// Content types accepted for upload, by prefix or exact match.
pub const ALLOWED_CONTENT_TYPE_PREFIXES: &[&str] = &["image/", "audio/", "video/"];
pub const ALLOWED_CONTENT_TYPES: &[&str] = &["application/pdf"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    Expired,
    Invalid,
}

impl std::fmt::Display for SignatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expired => f.write_str("Upload URL has expired"),
            Self::Invalid => f.write_str("Upload URL signature is invalid"),
        }
    }
}

/// Reduce a client-supplied filename to `[a-z0-9._-]`, keeping the
/// extension and dropping any directory components.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    let mut out = String::with_capacity(base.len());
    for c in base.chars() {
        let mapped = if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
            c.to_ascii_lowercase()
        } else {
            '_'
        };
        // Collapse runs of underscores produced by replacement.
        if mapped == '_' && out.ends_with('_') {
            continue;
        }
        out.push(mapped);
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_').to_string();
    let mut name = if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed
    };

    if name.len() > MAX_FILENAME_LENGTH {
        match name.rfind('.') {
            Some(dot) if name.len() - dot <= 10 => {
                let ext = name[dot..].to_string();
                name.truncate(MAX_FILENAME_LENGTH - ext.len());
                name.push_str(&ext);
            }
            _ => name.truncate(MAX_FILENAME_LENGTH),
        }
    }
    name
}

pub fn validate_content_type(content_type: &str) -> Result<(), String> {
    let ct = content_type.trim().to_ascii_lowercase();
    let ok = ALLOWED_CONTENT_TYPE_PREFIXES
        .iter()
        .any(|p| ct.starts_with(p) && ct.len() > p.len())
        || ALLOWED_CONTENT_TYPES.contains(&ct.as_str());
    if ok {
        Ok(())
    } else {
        Err(format!(
            "Content type '{content_type}' is not allowed. Upload images, audio, video, or PDF files"
        ))
    }
}

/// Build a unique storage key `"<user_id>/<nonce>-<filename>"`.
pub fn storage_key(user_id: DbId, filename: &str) -> String {
    let nonce: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(KEY_NONCE_LENGTH)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("{user_id}/{nonce}-{}", sanitize_filename(filename))
}

/// Check that a storage key taken from a request path has the shape
/// produced by [`storage_key`] and cannot escape the upload directory.
pub fn validate_storage_key(key: &str) -> Result<(), String> {
    let invalid = || format!("Invalid storage key '{key}'");
    let (owner, file) = key.split_once('/').ok_or_else(invalid)?;
    if owner.is_empty() || !owner.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if file.is_empty()
        || file.starts_with('.')
        || file.contains("..")
        || !file
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-' || b == b'_')
    {
        return Err(invalid());
    }
    Ok(())
}

fn signing_payload(key: &str, expires: i64) -> String {
    format!("PUT\n{key}\n{expires}")
}

/// Hex-encoded HMAC-SHA256 signature for an upload URL.
pub fn sign_upload(secret: &str, key: &str, expires: i64) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(signing_payload(key, expires).as_bytes());
    mac.finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Verify an upload URL's signature and expiry against `now` (Unix seconds).
pub fn verify_upload_signature(
    secret: &str,
    key: &str,
    expires: i64,
    signature: &str,
    now: i64,
) -> Result<(), SignatureError> {
    let expected = sign_upload(secret, key, expires);
    if !secrets_match(signature, &expected) {
        return Err(SignatureError::Invalid);
    }
    if now > expires {
        return Err(SignatureError::Expired);
    }
    Ok(())
}
