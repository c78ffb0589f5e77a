//! Salted password hashing and opaque-secret primitives.
//!
//! Digests are Argon2id PHC strings computed over an explicit per-user
//! salt, so a digest is deterministic for a given (password, salt) pair.
//! Verification re-hashes the candidate and compares the full digest with
//! [`constant_time_eq`]; there is no early exit on the first mismatched
//! byte, and the same comparison backs bearer-token checks.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use rand::{Rng, distr::Alphanumeric};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

use crate::domain::password::Password;

#[derive(Debug, Clone, Error)]
pub enum HasherError {
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("malformed salt: {0}")]
    MalformedSalt(String),
}

/// A per-user random salt, stored in its B64 form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt(String);

impl Salt {
    /// Fresh random salt. No reuse guarantee is needed beyond per-call
    /// freshness.
    pub fn generate() -> Self {
        Self(SaltString::generate(rand_core::OsRng).to_string())
    }

    pub fn from_b64(raw: &str) -> Result<Self, HasherError> {
        SaltString::from_b64(raw).map_err(|e| HasherError::MalformedSalt(e.to_string()))?;
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An Argon2id PHC digest of a (password, salt) pair.
#[derive(Debug, Clone)]
pub struct PasswordDigest(Secret<String>);

impl PasswordDigest {
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CredentialHasher;

impl CredentialHasher {
    pub fn new() -> Self {
        Self
    }

    fn argon2(&self) -> Result<Argon2<'static>, HasherError> {
        Ok(Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            Params::new(15000, 2, 1, None).map_err(|e| HasherError::Hash(e.to_string()))?,
        ))
    }

    /// Deterministic digest of `password` under `salt`. An empty password
    /// is accepted here; presence policy lives upstream.
    pub fn digest(&self, password: &Password, salt: &Salt) -> Result<PasswordDigest, HasherError> {
        let salt = SaltString::from_b64(salt.as_str())
            .map_err(|e| HasherError::MalformedSalt(e.to_string()))?;
        let digest = self
            .argon2()?
            .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
            .map_err(|e| HasherError::Hash(e.to_string()))?;

        Ok(PasswordDigest(Secret::from(digest.to_string())))
    }

    /// Re-hash `password` under `salt` and compare against `expected` in
    /// full. Returns `false` for malformed salts rather than erroring; a
    /// candidate that cannot be hashed cannot match.
    pub fn verify(&self, password: &Password, salt: &Salt, expected: &PasswordDigest) -> bool {
        match self.digest(password, salt) {
            Ok(candidate) => constant_time_eq(
                candidate.expose().as_bytes(),
                expected.expose().as_bytes(),
            ),
            Err(_) => false,
        }
    }
}

/// Byte-wise comparison without early exit. The length check alone is
/// observable, which is acceptable: secret lengths here are fixed.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Opaque alphanumeric secret from the thread RNG, used for api tokens,
/// session identifiers and generated reset passwords.
pub fn mint_secret(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn password(raw: &str) -> Password {
        Password::try_from(Secret::from(raw.to_string())).unwrap()
    }

    #[test]
    fn digest_is_deterministic_per_salt() {
        let hasher = CredentialHasher::new();
        let salt = Salt::generate();
        let a = hasher.digest(&password("p"), &salt).unwrap();
        let b = hasher.digest(&password("p"), &salt).unwrap();
        assert_eq!(a.expose(), b.expose());
    }

    #[test]
    fn digest_differs_across_salts() {
        let hasher = CredentialHasher::new();
        let a = hasher.digest(&password("p"), &Salt::generate()).unwrap();
        let b = hasher.digest(&password("p"), &Salt::generate()).unwrap();
        assert_ne!(a.expose(), b.expose());
    }

    #[test]
    fn verify_rejects_wrong_salt() {
        let hasher = CredentialHasher::new();
        let salt = Salt::generate();
        let digest = hasher.digest(&password("p"), &salt).unwrap();
        assert!(hasher.verify(&password("p"), &salt, &digest));
        assert!(!hasher.verify(&password("p"), &Salt::generate(), &digest));
    }

    #[test]
    fn verify_tolerates_malformed_salt() {
        let hasher = CredentialHasher::new();
        let salt = Salt::generate();
        let digest = hasher.digest(&password("p"), &salt).unwrap();
        let garbage = Salt("not b64 at all!!".to_owned());
        assert!(!hasher.verify(&password("p"), &garbage, &digest));
    }

    #[quickcheck]
    fn round_trip_verifies(raw: String) -> TestResult {
        if raw.is_empty() {
            return TestResult::discard();
        }
        let hasher = CredentialHasher::new();
        let salt = Salt::generate();
        let pw = password(&raw);
        let digest = hasher.digest(&pw, &salt).unwrap();
        TestResult::from_bool(hasher.verify(&pw, &salt, &digest))
    }

    #[quickcheck]
    fn mutated_password_fails(raw: String, flip: u8) -> TestResult {
        if raw.is_empty() {
            return TestResult::discard();
        }
        let mut mutated = raw.clone().into_bytes();
        let idx = flip as usize % mutated.len();
        mutated[idx] ^= 1;
        let Ok(mutated) = String::from_utf8(mutated) else {
            return TestResult::discard();
        };
        if mutated == raw || mutated.is_empty() {
            return TestResult::discard();
        }

        let hasher = CredentialHasher::new();
        let salt = Salt::generate();
        let digest = hasher.digest(&password(&raw), &salt).unwrap();
        TestResult::from_bool(!hasher.verify(&password(&mutated), &salt, &digest))
    }

    #[test]
    fn constant_time_eq_basics() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn mint_secret_is_alphanumeric_of_requested_length() {
        let secret = mint_secret(40);
        assert_eq!(secret.len(), 40);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(secret, mint_secret(40));
    }

    #[test]
    fn salt_round_trips_through_b64() {
        let salt = Salt::generate();
        let parsed = Salt::from_b64(salt.as_str()).unwrap();
        assert_eq!(salt, parsed);
        assert!(Salt::from_b64("not b64 at all!!").is_err());
    }
}
