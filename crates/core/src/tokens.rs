//! Opaque random tokens for email verification links.
//!
//! Only the SHA-256 digest of a token is persisted; the plaintext goes into
//! the verification link and is never stored.

use rand::Rng;

use crate::hashing::sha256_hex;

/// Length of a generated verification token.
pub const VERIFICATION_TOKEN_LENGTH: usize = 40;

/// A freshly generated token and the digest to persist.
pub struct GeneratedToken {
    pub plaintext: String,
    pub hash: String,
}

pub fn generate_verification_token() -> GeneratedToken {
    let plaintext: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(VERIFICATION_TOKEN_LENGTH)
        .map(char::from)
        .collect();
    let hash = hash_token(&plaintext);
    GeneratedToken { plaintext, hash }
}

pub fn hash_token(token: &str) -> String {
    sha256_hex(token.trim().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_token_shape() {
        let token = generate_verification_token();
        assert_eq!(token.plaintext.len(), VERIFICATION_TOKEN_LENGTH);
        assert!(token.plaintext.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(token.hash, hash_token(&token.plaintext));
    }

    #[test]
    fn tokens_are_unique() {
        let a = generate_verification_token();
        let b = generate_verification_token();
        assert_ne!(a.plaintext, b.plaintext);
    }

    #[test]
    fn surrounding_whitespace_ignored() {
        assert_eq!(hash_token(" abc \n"), hash_token("abc"));
    }
}
