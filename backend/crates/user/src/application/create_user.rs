//! Admin create

use std::sync::Arc;

use auth::application::register::{parse_identity, validate_password};
use auth::models::{User, UserId, UserRole};
use kernel::validation::FieldErrors;
use platform::password::{PasswordHasher, hash_blocking};
use validator::Validate;

use crate::domain::repository::UserAdminRepository;
use crate::error::{UserError, UserResult};

#[derive(Debug, Clone, Validate)]
pub struct CreateUserInput {
    #[validate(length(min = 1, max = 255, message = "name is required and must be at most 255 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    /// Defaults to `user`
    #[validate(range(min = 1, max = 4, message = "must be a known role id"))]
    pub role_id: Option<i16>,
}

pub struct CreateUserUseCase<R, H>
where
    R: UserAdminRepository,
    H: PasswordHasher + ?Sized + 'static,
{
    repo: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> CreateUserUseCase<R, H>
where
    R: UserAdminRepository,
    H: PasswordHasher + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repo, hasher }
    }

    /// Only a caller whose role implies every role may grant `super_admin`
    pub async fn execute(&self, actor: UserRole, input: CreateUserInput) -> UserResult<UserId> {
        input.validate()?;

        let (name, email) = parse_identity(&input.name, &input.email)?;
        let role = match input.role_id {
            None => UserRole::default(),
            Some(id) => UserRole::from_id(id)
                .ok_or_else(|| FieldErrors::single("roleId", "must be a known role id"))?,
        };
        if role.implies_all_roles() && !actor.implies_all_roles() {
            tracing::warn!(actor = %actor, role = %role, "Role grant refused");
            return Err(UserError::RoleNotAllowed);
        }

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(UserError::EmailTaken);
        }

        let password_hash = hash_blocking(self.hasher.clone(), input.password).await?;
        let user = User::with_role(name, email, password_hash, role);
        let user_id = self.repo.create(&user).await?;

        tracing::info!(user_id = %user_id, role = %role, "User created by admin");

        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeHasher, InMemoryUserAdminRepository, user};

    fn input(email: &str, role_id: Option<i16>) -> CreateUserInput {
        CreateUserInput {
            name: "Staff Member".to_string(),
            email: email.to_string(),
            password: "password".to_string(),
            role_id,
        }
    }

    fn use_case(
        repo: Arc<InMemoryUserAdminRepository>,
    ) -> CreateUserUseCase<InMemoryUserAdminRepository, FakeHasher> {
        CreateUserUseCase::new(repo, Arc::new(FakeHasher))
    }

    #[tokio::test]
    async fn test_create_with_role() {
        let repo = Arc::new(InMemoryUserAdminRepository::default());
        let id = use_case(repo.clone())
            .execute(UserRole::Admin, input("staff@gmail.com", Some(3)))
            .await
            .unwrap();

        let stored = repo.get(&id).unwrap();
        assert_eq!(stored.role, UserRole::Staff);
        assert!(FakeHasher.verify("password", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_create_defaults_to_user_role() {
        let repo = Arc::new(InMemoryUserAdminRepository::default());
        let id = use_case(repo.clone())
            .execute(UserRole::Admin, input("someone@gmail.com", None))
            .await
            .unwrap();
        assert_eq!(repo.get(&id).unwrap().role, UserRole::User);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let repo = Arc::new(InMemoryUserAdminRepository::default());
        repo.insert(user("activeUser1", "activeuser1@gmail.com"));

        let result = use_case(repo)
            .execute(UserRole::Admin, input("ActiveUser1@gmail.com", None))
            .await;
        assert!(matches!(result, Err(UserError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_unknown_role_is_validation_error() {
        let repo = Arc::new(InMemoryUserAdminRepository::default());
        let result = use_case(repo)
            .execute(UserRole::Admin, input("x@gmail.com", Some(9)))
            .await;

        let Err(UserError::Validation(fields)) = result else {
            panic!("expected validation error");
        };
        assert!(fields.contains("roleId"));
    }

    #[tokio::test]
    async fn test_only_super_admin_grants_super_admin() {
        let repo = Arc::new(InMemoryUserAdminRepository::default());

        let result = use_case(repo.clone())
            .execute(UserRole::Admin, input("root@gmail.com", Some(1)))
            .await;
        assert!(matches!(result, Err(UserError::RoleNotAllowed)));
        assert_eq!(repo.len(), 0);

        let id = use_case(repo.clone())
            .execute(UserRole::SuperAdmin, input("root@gmail.com", Some(1)))
            .await
            .unwrap();
        assert_eq!(repo.get(&id).unwrap().role, UserRole::SuperAdmin);
    }

    #[tokio::test]
    async fn test_password_expanding_past_limit_is_validation_error() {
        let repo = Arc::new(InMemoryUserAdminRepository::default());
        let mut request = input("someone@gmail.com", None);
        request.password = "\u{FDFA}".repeat(8);

        let Err(UserError::Validation(fields)) =
            use_case(repo).execute(UserRole::Admin, request).await
        else {
            panic!("expected validation error");
        };
        assert!(fields.contains("password"));
    }
}
