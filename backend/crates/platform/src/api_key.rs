//! `x-api-key` header parsing
//!
//! Clients send `x-api-key: Key <secret>`. The header must split on a single
//! space into exactly two parts; the second part is the key.

use http::HeaderMap;
use thiserror::Error;

use crate::crypto::constant_time_eq;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiKeyError {
    #[error("no api key provided")]
    Missing,

    #[error("invalid api key")]
    Invalid,
}

/// Check the request's API key against `expected`
pub fn check_api_key(headers: &HeaderMap, expected: &str) -> Result<(), ApiKeyError> {
    let raw = headers
        .get(API_KEY_HEADER)
        .ok_or(ApiKeyError::Missing)?
        .to_str()
        .map_err(|_| ApiKeyError::Invalid)?;

    if raw.is_empty() {
        return Err(ApiKeyError::Missing);
    }

    let parts: Vec<&str> = raw.split(' ').collect();
    let [_, key] = parts.as_slice() else {
        return Err(ApiKeyError::Invalid);
    };

    if constant_time_eq(key.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        Err(ApiKeyError::Invalid)
    }
}
