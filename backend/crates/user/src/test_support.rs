//! In-memory fakes for unit tests

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use auth::models::{Email, User, UserId, UserName};
use chrono::Utc;
use platform::password::{PasswordHashError, PasswordHasher};

use crate::domain::query::{ListQuery, SortField, SortOrder};
use crate::domain::repository::UserAdminRepository;
use crate::error::UserResult;

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

/// A fixture user with password `password`
pub fn user(name: &str, email: &str) -> User {
    User::new(
        UserName::new(name).unwrap(),
        Email::new(email).unwrap(),
        "fake$password".to_string(),
    )
}

#[derive(Debug, Default)]
pub struct InMemoryUserAdminRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserAdminRepository {
    pub fn insert(&self, user: User) -> UserId {
        let id = user.user_id;
        self.users.lock().unwrap().insert(id, user);
        id
    }

    pub fn get(&self, user_id: &UserId) -> Option<User> {
        self.users.lock().unwrap().get(user_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn id_of(&self, email: &str) -> UserId {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_str() == email)
            .map(|u| u.user_id)
            .unwrap()
    }
}

fn compare(a: &User, b: &User, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.as_str().cmp(b.name.as_str()),
        SortField::Email => a.email.as_str().cmp(b.email.as_str()),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

impl UserAdminRepository for InMemoryUserAdminRepository {
    async fn list(&self, query: &ListQuery) -> UserResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| query.include_deleted || !u.is_deleted())
            .filter(|u| query.matches(u.name.as_str(), u.email.as_str()))
            .cloned()
            .collect();

        users.sort_by(|a, b| {
            let ordering = compare(a, b, query.sort_by);
            match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        Ok(users
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn count(&self, include_deleted: bool) -> UserResult<i64> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .filter(|u| include_deleted || !u.is_deleted())
            .count() as i64)
    }

    async fn find_by_id(&self, user_id: &UserId) -> UserResult<Option<User>> {
        Ok(self.get(user_id).filter(|u| !u.is_deleted()))
    }

    async fn find_by_email(&self, email: &Email) -> UserResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email && !u.is_deleted())
            .cloned())
    }

    async fn create(&self, user: &User) -> UserResult<UserId> {
        Ok(self.insert(user.clone()))
    }

    async fn update(&self, user: &User) -> UserResult<bool> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(&user.user_id) {
            Some(stored) if !stored.is_deleted() => {
                stored.name = user.name.clone();
                stored.email = user.email.clone();
                stored.password_hash = user.password_hash.clone();
                stored.updated_at = user.updated_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn soft_delete(&self, user_id: &UserId) -> UserResult<bool> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(user_id) {
            Some(stored) if !stored.is_deleted() => {
                stored.soft_delete();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn hard_delete(&self, user_id: &UserId) -> UserResult<bool> {
        Ok(self.users.lock().unwrap().remove(user_id).is_some())
    }

    async fn restore(&self, user_id: &UserId) -> UserResult<bool> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(user_id) {
            Some(stored) => {
                stored.deleted_at = None;
                stored.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
