//! Email Value Object
//!
//! A syntactically valid, trimmed, lower-cased email address. Syntax
//! checking is `validator`'s, so DTO validation and this type agree.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use validator::ValidateEmail;

/// Maximum email length (per RFC 5321)
pub const EMAIL_MAX_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("email is required")]
    Empty,

    #[error("must be at most {EMAIL_MAX_LENGTH} characters")]
    TooLong,

    #[error("must be a valid email address")]
    InvalidFormat,
}

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let email = email.as_ref().trim().to_lowercase();

        if email.is_empty() {
            return Err(EmailError::Empty);
        }
        if email.len() > EMAIL_MAX_LENGTH {
            return Err(EmailError::TooLong);
        }
        if !email.validate_email() {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(email))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }

    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
