//! Admin update (partial)

use std::sync::Arc;

use auth::application::register::validate_password;
use auth::models::{Email, UserId, UserName};
use kernel::validation::FieldErrors;
use platform::password::{PasswordHasher, hash_blocking};
use validator::Validate;

use crate::domain::repository::UserAdminRepository;
use crate::error::{UserError, UserResult};

/// Absent fields are left unchanged
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateUserInput {
    #[validate(length(min = 1, max = 255, message = "name must be 1 to 255 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_password"))]
    pub password: Option<String>,
}

pub struct UpdateUserUseCase<R, H>
where
    R: UserAdminRepository,
    H: PasswordHasher + ?Sized + 'static,
{
    repo: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UpdateUserUseCase<R, H>
where
    R: UserAdminRepository,
    H: PasswordHasher + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repo, hasher }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateUserInput) -> UserResult<UserId> {
        input.validate()?;

        let mut errors = FieldErrors::new();
        let name = input
            .name
            .as_deref()
            .map(UserName::new)
            .transpose()
            .map_err(|e| errors.add("name", e.to_string()))
            .ok()
            .flatten();
        let email = input
            .email
            .as_deref()
            .map(Email::new)
            .transpose()
            .map_err(|e| errors.add("email", e.to_string()))
            .ok()
            .flatten();
        errors.into_result()?;

        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::UserNotFound)?;

        if let Some(email) = email {
            if email != user.email {
                if let Some(other) = self.repo.find_by_email(&email).await? {
                    if other.user_id != user.user_id {
                        return Err(UserError::EmailTaken);
                    }
                }
                user.set_email(email);
            }
        }

        if let Some(name) = name {
            user.set_name(name);
        }

        if let Some(password) = input.password {
            let password_hash = hash_blocking(self.hasher.clone(), password).await?;
            user.set_password_hash(password_hash);
        }

        if !self.repo.update(&user).await? {
            return Err(UserError::UserNotFound);
        }

        tracing::info!(user_id = %user.user_id, "User updated by admin");

        Ok(user.user_id)
    }
}
