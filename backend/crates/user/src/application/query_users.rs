//! List / get / stats

use std::sync::Arc;

use auth::models::{User, UserId};

use crate::domain::query::{ListQuery, UserStats};
use crate::domain::repository::UserAdminRepository;
use crate::error::{UserError, UserResult};

pub struct UserQueryUseCase<R>
where
    R: UserAdminRepository,
{
    repo: Arc<R>,
}

impl<R> UserQueryUseCase<R>
where
    R: UserAdminRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, query: &ListQuery) -> UserResult<Vec<User>> {
        self.repo.list(query).await
    }

    pub async fn get(&self, user_id: &UserId) -> UserResult<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::UserNotFound)
    }

    /// Two counts; deleted = all - non-deleted
    pub async fn stats(&self) -> UserResult<UserStats> {
        let total = self.repo.count(true).await?;
        let non_deleted = self.repo.count(false).await?;
        Ok(UserStats::from_counts(total, non_deleted))
    }
}
