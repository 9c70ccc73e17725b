//! In-memory fakes for unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use platform::password::{PasswordHashError, PasswordHasher};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Reversible "hash" so tests skip Argon2's cost
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeHasher;

impl PasswordHasher for FakeHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        Ok(format!("fake${plaintext}"))
    }

    fn verify(&self, plaintext: &str, digest: &str) -> bool {
        digest.strip_prefix("fake$") == Some(plaintext)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
    fail: bool,
}

impl InMemoryUserRepository {
    /// Every call fails like a dropped connection
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.user_id, user);
    }

    pub fn get(&self, user_id: &UserId) -> Option<User> {
        self.users.lock().unwrap().get(user_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn soft_delete_by_email(&self, email: &str) {
        for user in self.users.lock().unwrap().values_mut() {
            if user.email.as_str() == email {
                user.deleted_at = Some(Utc::now());
            }
        }
    }

    fn check(&self) -> AuthResult<()> {
        if self.fail {
            Err(AuthError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email && !u.is_deleted())
            .cloned())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        self.check()?;
        Ok(self.get(user_id).filter(|u| !u.is_deleted()))
    }

    async fn create(&self, user: &User) -> AuthResult<UserId> {
        self.check()?;
        self.insert(user.clone());
        Ok(user.user_id)
    }
}
