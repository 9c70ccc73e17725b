//! Soft delete / hard delete / restore

use std::sync::Arc;

use auth::models::UserId;

use crate::domain::repository::UserAdminRepository;
use crate::error::{UserError, UserResult};

pub struct UserLifecycleUseCase<R>
where
    R: UserAdminRepository,
{
    repo: Arc<R>,
}

impl<R> UserLifecycleUseCase<R>
where
    R: UserAdminRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Hide the user from lookups and login
    pub async fn soft_delete(&self, user_id: &UserId) -> UserResult<()> {
        found(self.repo.soft_delete(user_id).await?)?;
        tracing::info!(user_id = %user_id, "User soft-deleted");
        Ok(())
    }

    pub async fn hard_delete(&self, user_id: &UserId) -> UserResult<()> {
        found(self.repo.hard_delete(user_id).await?)?;
        tracing::warn!(user_id = %user_id, "User permanently deleted");
        Ok(())
    }

    pub async fn restore(&self, user_id: &UserId) -> UserResult<()> {
        found(self.repo.restore(user_id).await?)?;
        tracing::info!(user_id = %user_id, "User restored");
        Ok(())
    }
}

fn found(matched: bool) -> UserResult<()> {
    if matched { Ok(()) } else { Err(UserError::UserNotFound) }
}
