//! HTTP Handlers

use std::sync::Arc;

use axum::extract::State;
use kernel::extract::JsonBody;
use kernel::id::UserId;
use kernel::response::Payload;
use platform::password::PasswordHasher;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::{LoginUseCase, RegisterUseCase};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse,
};
use crate::presentation::middleware::AuthUser;

/// Shared state for auth handlers
pub struct AuthAppState<R, H>
where
    R: UserRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    pub repo: Arc<R>,
    pub hasher: Arc<H>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: derive would require `H: Clone`, which `dyn PasswordHasher` is not.
impl<R, H> Clone for AuthAppState<R, H>
where
    R: UserRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            hasher: self.hasher.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/v1/auth/register
pub async fn register<R, H>(
    State(state): State<AuthAppState<R, H>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AuthResult<Payload<RegisterResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(req.into()).await?;

    Ok(Payload::new(RegisterResponse {
        id: output.user_id.unwrap_or_else(UserId::nil),
    }))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/v1/auth/login
pub async fn login<R, H>(
    State(state): State<AuthAppState<R, H>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<Payload<LoginResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.tokens.clone(),
    );

    let output = use_case.execute(req.into()).await?;

    Ok(Payload::new(LoginResponse {
        access_token: output.access_token,
    }))
}

// ============================================================================
// Me
// ============================================================================

/// GET /api/v1/auth/me (behind `require_auth`)
pub async fn me(AuthUser(claims): AuthUser) -> Payload<MeResponse> {
    Payload::new(MeResponse {
        user_id: claims.user_id,
        role_name: claims.role_name,
        expires_at: claims.expires_at(),
    })
}
