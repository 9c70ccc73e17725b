//! User Management Error Types

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::FieldErrors;
use platform::password::PasswordHashError;
use thiserror::Error;

pub type UserResult<T> = Result<T, UserError>;

#[derive(Debug, Error)]
pub enum UserError {
    /// Request failed field validation
    #[error("{0}")]
    Validation(FieldErrors),

    #[error("user not found")]
    UserNotFound,

    /// Caller's role may not grant the requested role
    #[error("role can't access resource")]
    RoleNotAllowed,

    /// Email belongs to another non-deleted user
    #[error("user email already exists")]
    EmailTaken,

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] PasswordHashError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UserError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::Validation(_) => ErrorKind::UnprocessableEntity,
            UserError::UserNotFound => ErrorKind::NotFound,
            UserError::RoleNotAllowed => ErrorKind::Forbidden,
            UserError::EmailTaken => ErrorKind::Conflict,
            UserError::Hashing(_) | UserError::Database(_) | UserError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            UserError::Validation(fields) => fields.clone().into(),
            UserError::Hashing(_) | UserError::Database(_) | UserError::Internal(_) => {
                AppError::internal("internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            UserError::Database(e) => {
                tracing::error!(error = %e, "User database error");
            }
            UserError::Hashing(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            UserError::Internal(msg) => {
                tracing::error!(message = %msg, "User internal error");
            }
            _ => {
                tracing::debug!(error = %self, "User error");
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<FieldErrors> for UserError {
    fn from(errors: FieldErrors) -> Self {
        UserError::Validation(errors)
    }
}

impl From<validator::ValidationErrors> for UserError {
    fn from(errors: validator::ValidationErrors) -> Self {
        UserError::Validation(errors.into())
    }
}

/// Row decoding goes through the auth crate's mapper
impl From<AuthError> for UserError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Database(e) => UserError::Database(e),
            AuthError::EmailTaken => UserError::EmailTaken,
            AuthError::UserNotFound => UserError::UserNotFound,
            other => UserError::Internal(other.to_string()),
        }
    }
}
