use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;

use super::errors::AuthError;

/// Algorithm tag stored next to each digest.
pub const ALGORITHM: &str = "argon2";

/// Salted, adaptive one-way digest. Each call draws a fresh salt, so two
/// hashes of the same plaintext differ while both verify.
pub fn hash(plaintext: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|digest| digest.to_string())
        .map_err(|e| AuthError::HashFailure(e.to_string()))
}

/// True iff the plaintext reproduces the digest under its embedded salt and
/// cost parameters. Malformed digests fail closed: `false`, never an error,
/// so callers present one uniform invalid-credentials response.
pub fn verify(plaintext: &str, digest: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_verifies() {
        let digest = hash("correct horse battery staple").unwrap();
        assert!(verify("correct horse battery staple", &digest));
        assert!(!verify("wrong horse", &digest));
    }

    #[test]
    fn same_plaintext_hashes_differently_but_both_verify() {
        let a = hash("secret123").unwrap();
        let b = hash("secret123").unwrap();
        assert_ne!(a, b);
        assert!(verify("secret123", &a));
        assert!(verify("secret123", &b));
    }

    #[test]
    fn malformed_digest_fails_closed() {
        assert!(!verify("anything", "not-a-phc-string"));
        assert!(!verify("anything", ""));
        assert!(!verify("anything", "$argon2id$garbage"));
    }
}
