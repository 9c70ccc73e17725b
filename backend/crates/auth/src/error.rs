//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::FieldErrors;
use platform::api_key::ApiKeyError;
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body failed field validation
    #[error("{0}")]
    Validation(FieldErrors),

    /// Login for an email with no (non-deleted) account
    #[error("email not found")]
    EmailNotFound,

    /// Wrong password
    #[error("credentials do not match")]
    CredentialsMismatch,

    /// Email already registered (only when duplicates are rejected)
    #[error("user email already exists")]
    EmailTaken,

    #[error("user not found")]
    UserNotFound,

    /// No `Authorization` header
    #[error("no bearer token provided")]
    MissingBearerToken,

    /// `Authorization` is not `Bearer <token>`
    #[error("invalid bearer token")]
    MalformedBearerToken,

    /// Bad structure, signature, issuer or audience; or no claims on the
    /// request where a role gate expected them
    #[error("invalid bearer token")]
    InvalidToken,

    /// `nbf` is in the future
    #[error("bearer token not active")]
    TokenNotActive,

    /// `exp` has passed
    #[error("expired bearer token")]
    TokenExpired,

    /// Authenticated, but the role is not allowed here
    #[error("role can't access resource")]
    RoleNotAllowed,

    #[error("no api key provided")]
    NoApiKey,

    #[error("invalid api key")]
    InvalidApiKey,

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] PasswordHashError),

    /// Token signing failed
    #[error("Token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::UnprocessableEntity,
            AuthError::EmailNotFound | AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::CredentialsMismatch
            | AuthError::MissingBearerToken
            | AuthError::MalformedBearerToken
            | AuthError::InvalidToken
            | AuthError::TokenNotActive
            | AuthError::TokenExpired
            | AuthError::NoApiKey
            | AuthError::InvalidApiKey => ErrorKind::Unauthorized,
            AuthError::RoleNotAllowed => ErrorKind::Forbidden,
            AuthError::Hashing(_)
            | AuthError::Signing(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Server-side details stay out of the body.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(fields) => fields.clone().into(),
            AuthError::Hashing(_)
            | AuthError::Signing(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => AppError::internal("internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Hashing(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::Signing(e) => {
                tracing::error!(error = %e, "Token signing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::CredentialsMismatch => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken | AuthError::InvalidApiKey => {
                tracing::warn!(error = %self, "Rejected credentials");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<FieldErrors> for AuthError {
    fn from(errors: FieldErrors) -> Self {
        AuthError::Validation(errors)
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AuthError::Validation(errors.into())
    }
}

impl From<ApiKeyError> for AuthError {
    fn from(err: ApiKeyError) -> Self {
        match err {
            ApiKeyError::Missing => AuthError::NoApiKey,
            ApiKeyError::Invalid => AuthError::InvalidApiKey,
        }
    }
}
