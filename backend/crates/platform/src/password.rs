//! Password Hashing and Verification
//!
//! Argon2id hashing behind the [`PasswordHasher`] trait so services take the
//! hasher by injection and tests can swap in a cheap fake.
//!
//! ## Security Features
//! - Memory-hard, salted, adaptive hashing (PHC string output)
//! - Unicode NFKC normalization before hashing
//! - Optional application-wide pepper
//! - Zeroization of the peppered input buffer
//!
//! Hashing is deliberately slow. On the async executor use
//! [`hash_blocking`] / [`verify_blocking`], which move the work onto
//! tokio's blocking pool.

use std::fmt;
use std::sync::Arc;

use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

/// Minimum password length accepted at registration (NIST SP 800-63B)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Longest input the hasher accepts, in Unicode code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Length of `plaintext` in code points after NFKC normalization, which is
/// what the hasher measures against [`MAX_PASSWORD_LENGTH`]
pub fn normalized_len(plaintext: &str) -> usize {
    plaintext.nfkc().count()
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Input exceeds [`MAX_PASSWORD_LENGTH`]
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// The underlying algorithm failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

/// One-way password hashing
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` into a self-describing digest
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError>;

    /// `true` only if `plaintext` produced `digest`. Malformed digests are
    /// a mismatch, never an error.
    fn verify(&self, plaintext: &str, digest: &str) -> bool;
}

/// Argon2id hasher with OWASP default parameters (m=19456, t=2, p=1)
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    pepper: Option<Zeroizing<Vec<u8>>>,
}

impl Argon2Hasher {
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self {
            pepper: pepper.map(Zeroizing::new),
        }
    }

    /// NFKC-normalized password bytes with the pepper appended
    fn prepare(&self, plaintext: &str) -> Zeroizing<Vec<u8>> {
        let normalized: Zeroizing<String> = Zeroizing::new(plaintext.nfkc().collect());
        let mut bytes = Zeroizing::new(normalized.as_bytes().to_vec());
        if let Some(pepper) = &self.pepper {
            bytes.extend_from_slice(pepper);
        }
        bytes
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        let actual = normalized_len(plaintext);
        if actual > MAX_PASSWORD_LENGTH {
            return Err(PasswordHashError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual,
            });
        }

        let bytes = self.prepare(plaintext);
        let salt = SaltString::generate(OsRng);

        Argon2::default()
            .hash_password(&bytes, &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            tracing::debug!("Stored password digest is not a valid PHC string");
            return false;
        };

        let bytes = self.prepare(plaintext);
        Argon2::default().verify_password(&bytes, &parsed).is_ok()
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Hash on tokio's blocking pool
pub async fn hash_blocking<H>(hasher: Arc<H>, plaintext: String) -> Result<String, PasswordHashError>
where
    H: PasswordHasher + ?Sized + 'static,
{
    let plaintext = Zeroizing::new(plaintext);
    tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
        .await
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
}

/// Verify on tokio's blocking pool. A panicked or cancelled task is a mismatch.
pub async fn verify_blocking<H>(hasher: Arc<H>, plaintext: String, digest: String) -> bool
where
    H: PasswordHasher + ?Sized + 'static,
{
    let plaintext = Zeroizing::new(plaintext);
    match tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &digest)).await {
        Ok(valid) => valid,
        Err(e) => {
            tracing::error!(error = %e, "Password verification task failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::default();
        let digest = hasher.hash("TestPassword123!").unwrap();

        assert!(digest.starts_with("$argon2id$"));
        assert!(hasher.verify("TestPassword123!", &digest));
        assert!(!hasher.verify("WrongPassword123!", &digest));
    }

    #[test]
    fn test_same_input_gets_fresh_salt() {
        let hasher = Argon2Hasher::default();
        let a = hasher.hash("password").unwrap();
        let b = hasher.hash("password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_with_pepper() {
        let peppered = Argon2Hasher::new(Some(b"my_secret_pepper".to_vec()));
        let digest = peppered.hash("TestPassword123!").unwrap();

        assert!(peppered.verify("TestPassword123!", &digest));
        assert!(!Argon2Hasher::default().verify("TestPassword123!", &digest));
        assert!(!Argon2Hasher::new(Some(b"wrong".to_vec())).verify("TestPassword123!", &digest));
    }

    #[test]
    fn test_too_long_is_hashing_error() {
        let hasher = Argon2Hasher::default();
        let result = hasher.hash(&"a".repeat(MAX_PASSWORD_LENGTH + 1));
        assert!(matches!(result, Err(PasswordHashError::TooLong { .. })));
    }

    #[test]
    fn test_normalized_len_expands_compatibility_chars() {
        // U+FDFA expands to 18 code points under NFKC
        assert_eq!("\u{FDFA}".chars().count(), 1);
        assert_eq!(normalized_len("\u{FDFA}"), 18);
        assert_eq!(normalized_len("password"), 8);

        let hasher = Argon2Hasher::default();
        let result = hasher.hash(&"\u{FDFA}".repeat(8));
        assert!(matches!(
            result,
            Err(PasswordHashError::TooLong { actual: 144, .. })
        ));
    }

    #[test]
    fn test_malformed_digest_is_mismatch() {
        let hasher = Argon2Hasher::default();
        assert!(!hasher.verify("password", "not_a_valid_hash"));
        assert!(!hasher.verify("password", ""));
    }

    #[test]
    fn test_nfkc_equivalent_inputs_verify() {
        let hasher = Argon2Hasher::default();
        // Fullwidth forms normalize to ASCII under NFKC
        let digest = hasher.hash("ｐａｓｓｗｏｒｄ１").unwrap();
        assert!(hasher.verify("password1", &digest));
    }

    #[test]
    fn test_debug_redaction() {
        let hasher = Argon2Hasher::new(Some(b"secret".to_vec()));
        let debug_output = format!("{:?}", hasher);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }

    #[tokio::test]
    async fn test_blocking_helpers() {
        let hasher = Arc::new(Argon2Hasher::default());
        let digest = hash_blocking(hasher.clone(), "password".to_string())
            .await
            .unwrap();
        assert!(verify_blocking(hasher.clone(), "password".to_string(), digest.clone()).await);
        assert!(!verify_blocking(hasher, "nope".to_string(), digest).await);
    }
}
