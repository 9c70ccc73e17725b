//! Register Use Case
//!
//! Creates a new user account with the default role.

use std::borrow::Cow;
use std::sync::Arc;

use kernel::validation::FieldErrors;
use platform::password::{
    MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PasswordHasher, hash_blocking, normalized_len,
};
use validator::{Validate, ValidationError};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Register input
#[derive(Debug, Clone, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 255, message = "name is required and must be at most 255 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

/// Register output. `user_id` is `None` when the email was already
/// registered and duplicates are not rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutput {
    pub user_id: Option<UserId>,
}

/// Register use case
pub struct RegisterUseCase<R, H>
where
    R: UserRepository,
    H: PasswordHasher + ?Sized + 'static,
{
    repo: Arc<R>,
    hasher: Arc<H>,
    config: Arc<AuthConfig>,
}

impl<R, H> RegisterUseCase<R, H>
where
    R: UserRepository,
    H: PasswordHasher + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>, hasher: Arc<H>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            hasher,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        input.validate()?;

        let (name, email) = parse_identity(&input.name, &input.email)?;

        if let Some(existing) = self.repo.find_by_email(&email).await? {
            if self.config.reject_duplicate_email {
                return Err(AuthError::EmailTaken);
            }
            tracing::warn!(
                user_id = %existing.user_id,
                "Registration for an email already in use; returning no id"
            );
            return Ok(RegisterOutput { user_id: None });
        }

        let password_hash = hash_blocking(self.hasher.clone(), input.password).await?;

        let user = User::new(name, email, password_hash);
        let user_id = self.repo.create(&user).await?;

        tracing::info!(user_id = %user_id, role = %user.role, "User registered");

        Ok(RegisterOutput {
            user_id: Some(user_id),
        })
    }
}

/// Password length check, counted after NFKC normalization so it agrees
/// with the limit the hasher enforces
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = normalized_len(password);
    if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
        return Ok(());
    }
    Err(ValidationError::new("length").with_message(Cow::Owned(format!(
        "must be between {MIN_PASSWORD_LENGTH} and {MAX_PASSWORD_LENGTH} characters"
    ))))
}

/// Build the value objects, reporting every failing field together
pub fn parse_identity(name: &str, email: &str) -> Result<(UserName, Email), FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = UserName::new(name)
        .map_err(|e| errors.add("name", e.to_string()))
        .ok();
    let email = Email::new(email)
        .map_err(|e| errors.add("email", e.to_string()))
        .ok();

    match (name, email) {
        (Some(name), Some(email)) => Ok((name, email)),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_role::UserRole;
    use crate::test_support::{FakeHasher, InMemoryUserRepository};

    fn use_case(
        repo: Arc<InMemoryUserRepository>,
        config: AuthConfig,
    ) -> RegisterUseCase<InMemoryUserRepository, FakeHasher> {
        RegisterUseCase::new(repo, Arc::new(FakeHasher), Arc::new(config))
    }

    fn active_user() -> RegisterInput {
        RegisterInput {
            name: "activeUser1".to_string(),
            email: "activeUser1@gmail.com".to_string(),
            password: "password".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_user_with_default_role() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let output = use_case(repo.clone(), AuthConfig::default())
            .execute(active_user())
            .await
            .unwrap();

        let user_id = output.user_id.unwrap();
        let stored = repo.get(&user_id).unwrap();
        assert_eq!(stored.name.as_str(), "activeUser1");
        assert_eq!(stored.email.as_str(), "activeuser1@gmail.com");
        assert_eq!(stored.role, UserRole::User);
        assert_ne!(stored.password_hash, "password");
        assert!(FakeHasher.verify("password", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_duplicate_email_returns_no_id_by_default() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let service = use_case(repo.clone(), AuthConfig::default());

        assert!(service.execute(active_user()).await.unwrap().user_id.is_some());
        let second = service.execute(active_user()).await.unwrap();

        assert_eq!(second, RegisterOutput { user_id: None });
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_when_configured() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let service = use_case(
            repo.clone(),
            AuthConfig::default().reject_duplicate_email(true),
        );

        service.execute(active_user()).await.unwrap();
        let result = service.execute(active_user()).await;

        assert!(matches!(result, Err(AuthError::EmailTaken)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_email_match_ignores_case() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let service = use_case(repo.clone(), AuthConfig::default().reject_duplicate_email(true));

        service.execute(active_user()).await.unwrap();
        let mut shouting = active_user();
        shouting.email = "ACTIVEUSER1@GMAIL.COM".to_string();

        assert!(matches!(service.execute(shouting).await, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_all_invalid_fields_reported_together() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let input = RegisterInput {
            name: String::new(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };

        let Err(AuthError::Validation(fields)) =
            use_case(repo.clone(), AuthConfig::default()).execute(input).await
        else {
            panic!("expected validation error");
        };

        assert!(fields.contains("name"));
        assert!(fields.contains("email"));
        assert!(fields.contains("password"));
        assert_eq!(repo.len(), 0);
    }

    #[test]
    fn test_password_length_is_measured_after_normalization() {
        assert!(validate_password("password").is_ok());
        assert!(validate_password(&"a".repeat(128)).is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"a".repeat(129)).is_err());
        // 8 raw chars, 144 after NFKC
        assert!(validate_password(&"\u{FDFA}".repeat(8)).is_err());
    }

    #[tokio::test]
    async fn test_password_expanding_past_limit_is_validation_error() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let mut input = active_user();
        input.password = "\u{FDFA}".repeat(8);

        let result = use_case(repo.clone(), AuthConfig::default()).execute(input).await;
        let Err(AuthError::Validation(fields)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(fields.fields().collect::<Vec<_>>(), vec!["password"]);
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_name_is_rejected() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let mut input = active_user();
        input.name = "   ".to_string();

        let result = use_case(repo, AuthConfig::default()).execute(input).await;
        let Err(AuthError::Validation(fields)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(fields.fields().collect::<Vec<_>>(), vec!["name"]);
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let repo = Arc::new(InMemoryUserRepository::failing());
        let result = use_case(repo, AuthConfig::default()).execute(active_user()).await;
        assert!(matches!(result, Err(AuthError::Database(_))));
    }
}
