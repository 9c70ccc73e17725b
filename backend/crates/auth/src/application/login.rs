//! Login Use Case
//!
//! Verifies email + password and issues an access token.

use std::sync::Arc;

use kernel::validation::FieldErrors;
use platform::password::{PasswordHasher, verify_blocking};
use validator::Validate;

use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Login input
#[derive(Debug, Clone, Validate)]
pub struct LoginInput {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Login output
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub access_token: String,
    pub user_id: UserId,
    pub role: UserRole,
}

/// Login use case
pub struct LoginUseCase<R, H>
where
    R: UserRepository,
    H: PasswordHasher + ?Sized + 'static,
{
    repo: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<TokenService>,
}

impl<R, H> LoginUseCase<R, H>
where
    R: UserRepository,
    H: PasswordHasher + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>, hasher: Arc<H>, tokens: Arc<TokenService>) -> Self {
        Self {
            repo,
            hasher,
            tokens,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        input.validate()?;

        let email = Email::new(&input.email)
            .map_err(|e| FieldErrors::single("email", e.to_string()))?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::EmailNotFound)?;

        let valid = verify_blocking(
            self.hasher.clone(),
            input.password,
            user.password_hash.clone(),
        )
        .await;

        if !valid {
            return Err(AuthError::CredentialsMismatch);
        }

        let access_token = self.tokens.issue(user.user_id, user.role)?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "User logged in");

        Ok(LoginOutput {
            access_token,
            user_id: user.user_id,
            role: user.role,
        })
    }
}
