//! User Entity
//!
//! A registered account. Credentials live on the same row: `password_hash`
//! is the hasher's PHC digest and never leaves the server.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_role::UserRole,
};

#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUIDv7 identifier
    pub user_id: UserId,
    /// Display name
    pub name: UserName,
    /// Unique among non-deleted users
    pub email: Email,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when soft-deleted
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// New self-registered user with the default role
    pub fn new(name: UserName, email: Email, password_hash: String) -> Self {
        Self::with_role(name, email, password_hash, UserRole::default())
    }

    pub fn with_role(
        name: UserName,
        email: Email,
        password_hash: String,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn set_name(&mut self, name: UserName) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    pub fn soft_delete(&mut self) {
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    pub fn restore(&mut self) {
        self.deleted_at = None;
        self.updated_at = Utc::now();
    }
}
