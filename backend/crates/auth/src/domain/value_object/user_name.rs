//! User Name Value Object
//!
//! Free-form display name. Not an identifier: duplicates are allowed and
//! login goes by email.
//!
//! ## Invariants
//! - NFKC-normalized, surrounding whitespace trimmed
//! - Length: 1..=255 characters (after normalization)
//! - No control characters

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const USER_NAME_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("name is required")]
    Empty,

    #[error("must be at most {USER_NAME_MAX_LENGTH} characters")]
    TooLong,

    #[error("must not contain control characters")]
    ControlCharacter,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let name = normalized.trim();

        if name.is_empty() {
            return Err(UserNameError::Empty);
        }
        if name.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong);
        }
        if name.chars().any(char::is_control) {
            return Err(UserNameError::ControlCharacter);
        }

        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
