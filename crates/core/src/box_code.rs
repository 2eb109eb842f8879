//! BOX codes: short, human-shareable join codes.
//!
//! Every user gets one at registration. A studio adds an artist to its
//! roster by entering the artist's code, so codes avoid characters that are
//! easy to misread (`0`/`O`, `1`/`I`).

use rand::Rng;

/// Fixed prefix on every code.
pub const BOX_CODE_PREFIX: &str = "BOX-";

/// Number of random characters after the prefix.
pub const BOX_CODE_BODY_LENGTH: usize = 6;

/// Characters a code body may contain.
pub const BOX_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// How many times registration retries on a code collision.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Generate a new random code such as `BOX-7KQ2ZD`.
pub fn generate_box_code() -> String {
    let mut rng = rand::rng();
    let body: String = (0..BOX_CODE_BODY_LENGTH)
        .map(|_| BOX_CODE_ALPHABET[rng.random_range(0..BOX_CODE_ALPHABET.len())] as char)
        .collect();
    format!("{BOX_CODE_PREFIX}{body}")
}

/// Normalize user input into canonical form.
///
/// Accepts lowercase input, surrounding whitespace, and a missing `BOX-`
/// prefix (`" box-7kq2zd "`, `"7KQ2ZD"`).
pub fn normalize_box_code(input: &str) -> Result<String, String> {
    let upper = input.trim().to_ascii_uppercase();
    let body = upper.strip_prefix(BOX_CODE_PREFIX).unwrap_or(&upper);

    if body.len() != BOX_CODE_BODY_LENGTH {
        return Err(format!(
            "BOX code must be {BOX_CODE_BODY_LENGTH} characters after the '{BOX_CODE_PREFIX}' prefix"
        ));
    }
    if !body.bytes().all(|b| BOX_CODE_ALPHABET.contains(&b)) {
        return Err(format!("'{}' is not a valid BOX code", input.trim()));
    }
    Ok(format!("{BOX_CODE_PREFIX}{body}"))
}
