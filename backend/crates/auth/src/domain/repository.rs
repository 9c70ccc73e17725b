//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// Credential store used by registration, login and the token flow.
///
/// Lookups only see non-deleted users. `Ok(None)` is "not found"; any
/// `Err` is an infrastructure failure.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Insert a new user, returning its id
    async fn create(&self, user: &User) -> AuthResult<UserId>;
}
