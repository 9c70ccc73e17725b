//! HTTP Handlers

use std::sync::Arc;

use auth::middleware::AuthUser;
use auth::models::UserId;
use axum::extract::{Path, State};
use kernel::extract::{JsonBody, QueryParams};
use kernel::response::Payload;
use kernel::validation::FieldErrors;
use platform::password::PasswordHasher;

use crate::application::{
    CreateUserUseCase, UpdateUserUseCase, UserLifecycleUseCase, UserQueryUseCase,
};
use crate::domain::query::{ListQuery, UserStats};
use crate::domain::repository::UserAdminRepository;
use crate::error::UserResult;
use crate::presentation::dto::{
    CreateUserRequest, IdResponse, ListUsersParams, UpdateUserRequest, UserEnvelope,
    UserResponse, UsersResponse,
};

/// Shared state for user management handlers
pub struct UserAppState<R, H>
where
    R: UserAdminRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    pub repo: Arc<R>,
    pub hasher: Arc<H>,
}

impl<R, H> Clone for UserAppState<R, H>
where
    R: UserAdminRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            hasher: self.hasher.clone(),
        }
    }
}

fn parse_user_id(raw: &str) -> UserResult<UserId> {
    UserId::parse(raw).map_err(|_| FieldErrors::single("id", "must be a valid UUID").into())
}

// ============================================================================
// Queries
// ============================================================================

/// GET /api/v1/users
pub async fn list_users<R, H>(
    State(state): State<UserAppState<R, H>>,
    QueryParams(params): QueryParams<ListUsersParams>,
) -> UserResult<Payload<UsersResponse>>
where
    R: UserAdminRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    let query = ListQuery::try_from(params)?;
    let users = UserQueryUseCase::new(state.repo.clone())
        .list(&query)
        .await?;

    Ok(Payload::new(UsersResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/users/stats
pub async fn user_stats<R, H>(
    State(state): State<UserAppState<R, H>>,
) -> UserResult<Payload<UserStats>>
where
    R: UserAdminRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    let stats = UserQueryUseCase::new(state.repo.clone()).stats().await?;
    Ok(Payload::new(stats))
}

/// GET /api/v1/users/{id}
pub async fn get_user<R, H>(
    State(state): State<UserAppState<R, H>>,
    Path(id): Path<String>,
) -> UserResult<Payload<UserEnvelope>>
where
    R: UserAdminRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    let user_id = parse_user_id(&id)?;
    let user = UserQueryUseCase::new(state.repo.clone())
        .get(&user_id)
        .await?;

    Ok(Payload::new(UserEnvelope { user: user.into() }))
}

// ============================================================================
// Commands
// ============================================================================

/// POST /api/v1/users
pub async fn create_user<R, H>(
    State(state): State<UserAppState<R, H>>,
    AuthUser(claims): AuthUser,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> UserResult<Payload<IdResponse>>
where
    R: UserAdminRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    let id = CreateUserUseCase::new(state.repo.clone(), state.hasher.clone())
        .execute(claims.role_name, req.into())
        .await?;

    Ok(Payload::new(IdResponse { id }))
}

/// PATCH /api/v1/users/{id}
pub async fn update_user<R, H>(
    State(state): State<UserAppState<R, H>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> UserResult<Payload<IdResponse>>
where
    R: UserAdminRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    let user_id = parse_user_id(&id)?;
    let id = UpdateUserUseCase::new(state.repo.clone(), state.hasher.clone())
        .execute(&user_id, req.into())
        .await?;

    Ok(Payload::new(IdResponse { id }))
}

/// DELETE /api/v1/users/{id}
pub async fn soft_delete_user<R, H>(
    State(state): State<UserAppState<R, H>>,
    Path(id): Path<String>,
) -> UserResult<Payload<IdResponse>>
where
    R: UserAdminRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    let user_id = parse_user_id(&id)?;
    UserLifecycleUseCase::new(state.repo.clone())
        .soft_delete(&user_id)
        .await?;

    Ok(Payload::new(IdResponse { id: user_id }))
}

/// DELETE /api/v1/users/{id}/permanent
pub async fn hard_delete_user<R, H>(
    State(state): State<UserAppState<R, H>>,
    Path(id): Path<String>,
) -> UserResult<Payload<IdResponse>>
where
    R: UserAdminRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    let user_id = parse_user_id(&id)?;
    UserLifecycleUseCase::new(state.repo.clone())
        .hard_delete(&user_id)
        .await?;

    Ok(Payload::new(IdResponse { id: user_id }))
}

/// POST /api/v1/users/{id}/restore
pub async fn restore_user<R, H>(
    State(state): State<UserAppState<R, H>>,
    Path(id): Path<String>,
) -> UserResult<Payload<IdResponse>>
where
    R: UserAdminRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    let user_id = parse_user_id(&id)?;
    UserLifecycleUseCase::new(state.repo.clone())
        .restore(&user_id)
        .await?;

    Ok(Payload::new(IdResponse { id: user_id }))
}
