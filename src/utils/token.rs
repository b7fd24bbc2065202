use rand::{distributions::Alphanumeric, thread_rng, Rng};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

pub fn generate_reset_token(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Hex SHA-256 digest of an opaque token, as stored in the database.
pub fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn digests_match(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_has_requested_length() {
        assert_eq!(generate_reset_token(48).len(), 48);
    }

    #[test]
    fn digest_is_stable_hex() {
        let d = token_digest("abc");
        assert_eq!(d.len(), 64);
        assert_eq!(d, token_digest("abc"));
        assert_ne!(d, token_digest("abd"));
    }

    #[test]
    fn digest_comparison() {
        let d = token_digest("abc");
        assert!(digests_match(&d, &token_digest("abc")));
        assert!(!digests_match(&d, &token_digest("xyz")));
    }
}
