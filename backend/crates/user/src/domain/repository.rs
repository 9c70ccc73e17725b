//! Repository Traits

use auth::models::{Email, User, UserId};

use crate::domain::query::ListQuery;
use crate::error::UserResult;

/// Admin-side persistence for users.
///
/// Lookups see non-deleted users only. Mutations return `false` when no
/// row matched.
#[trait_variant::make(UserAdminRepository: Send)]
pub trait LocalUserAdminRepository {
    /// One page of users, filtered and sorted per `query`
    async fn list(&self, query: &ListQuery) -> UserResult<Vec<User>>;

    /// Count users, optionally including soft-deleted ones
    async fn count(&self, include_deleted: bool) -> UserResult<i64>;

    async fn find_by_id(&self, user_id: &UserId) -> UserResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> UserResult<Option<User>>;

    async fn create(&self, user: &User) -> UserResult<UserId>;

    /// Persist name, email, password and `updated_at`
    async fn update(&self, user: &User) -> UserResult<bool>;

    /// Set `deleted_at` on a non-deleted user
    async fn soft_delete(&self, user_id: &UserId) -> UserResult<bool>;

    /// Remove the row, deleted or not
    async fn hard_delete(&self, user_id: &UserId) -> UserResult<bool>;

    /// Clear `deleted_at`
    async fn restore(&self, user_id: &UserId) -> UserResult<bool>;
}
