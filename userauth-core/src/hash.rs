//! Password digest primitive shared by seeding and verification.
//!
//! Both call sites must agree on this function exactly: a value seeded
//! for `user{i}` verifies later against `sha256_hex("password{i}")`.

use sha2::{Digest, Sha256};

/// SHA-256 over the UTF-8 bytes of `input`, rendered as 64 lowercase
/// hexadecimal characters.
pub fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vectors() {
        assert_eq!(
            sha256_hex("password1"),
            "0b14d501a594442a01c6859541bcb3e8164d183d32937b851835442f69d5c94e"
        );
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn deterministic_across_calls() {
        let first = sha256_hex("password2");
        assert_eq!(first, sha256_hex("password2"));
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
