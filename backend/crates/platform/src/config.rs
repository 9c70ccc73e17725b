//! Environment configuration helpers
//!
//! Values come from the process environment (optionally seeded from `.env`
//! by the binary). Empty values count as unset.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(String),

    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Deployment environment (`APP_ENV`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnv {
    #[default]
    Development,
    Staging,
    Production,
}

impl AppEnv {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AppEnv::Development => "development",
            AppEnv::Staging => "staging",
            AppEnv::Production => "production",
        }
    }

    pub const fn is_development(&self) -> bool {
        matches!(self, AppEnv::Development)
    }
}

impl FromStr for AppEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnv::Development),
            "staging" => Ok(AppEnv::Staging),
            "production" | "prod" => Ok(AppEnv::Production),
            other => Err(format!("unknown environment {other:?}")),
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read a variable, treating empty as unset
pub fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn required(key: &str) -> Result<String, ConfigError> {
    optional(key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}

/// Read and parse a variable, falling back to `default` when unset
pub fn parsed_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match optional(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            value,
            reason: e.to_string(),
        }),
    }
}

/// Read a duration variable (see [`parse_duration`])
pub fn duration_or(key: &str, default: Duration) -> Result<Duration, ConfigError> {
    match optional(key) {
        None => Ok(default),
        Some(value) => parse_duration(&value).map_err(|reason| ConfigError::Invalid {
            key: key.to_string(),
            value,
            reason,
        }),
    }
}

/// Read a boolean variable (see [`parse_bool`])
pub fn bool_or(key: &str, default: bool) -> Result<bool, ConfigError> {
    match optional(key) {
        None => Ok(default),
        Some(value) => parse_bool(&value).ok_or_else(|| ConfigError::Invalid {
            key: key.to_string(),
            value,
            reason: "expected true/false".to_string(),
        }),
    }
}

/// Parse durations written like `24h`, `1h30m`, `90s`, `250ms`.
/// A bare integer is seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty duration".to_string());
    }

    if let Ok(secs) = input.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut rest = input;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            return Err(format!("expected a number in {input:?}"));
        }
        let value: u64 = rest[..digits]
            .parse()
            .map_err(|_| format!("number too large in {input:?}"))?;
        rest = &rest[digits..];

        let unit_len = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let part = match &rest[..unit_len] {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value * 60),
            "h" => Duration::from_secs(value * 3600),
            "d" => Duration::from_secs(value * 86_400),
            "" => return Err(format!("missing unit in {input:?}")),
            unit => return Err(format!("unknown unit {unit:?} in {input:?}")),
        };
        total += part;
        rest = &rest[unit_len..];
    }

    Ok(total)
}

pub fn parse_bool(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
