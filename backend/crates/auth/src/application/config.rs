//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

/// Issuer and audience stamped into every token
pub const TOKEN_ISSUER: &str = "hackathon-starter";

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 signing secret
    pub jwt_secret: String,
    /// Token lifetime (`exp - iat`)
    pub token_ttl: Duration,
    pub issuer: String,
    pub audience: String,
    /// Registering an email that already exists fails with 409 instead of
    /// succeeding with no id
    pub reject_duplicate_email: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl: Duration::from_secs(24 * 3600), // 24 hours
            issuer: TOKEN_ISSUER.to_string(),
            audience: TOKEN_ISSUER.to_string(),
            reject_duplicate_email: false,
        }
    }
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl: Duration) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl,
            ..Default::default()
        }
    }

    /// Create config with a random signing secret (for development).
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        Self {
            jwt_secret: platform::crypto::random_secret(32),
            ..Default::default()
        }
    }

    pub fn reject_duplicate_email(mut self, reject: bool) -> Self {
        self.reject_duplicate_email = reject;
        self
    }

    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("reject_duplicate_email", &self.reject_duplicate_email)
            .finish()
    }
}
