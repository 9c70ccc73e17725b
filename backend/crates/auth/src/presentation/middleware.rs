//! Auth Middleware
//!
//! `require_auth` authenticates a bearer token and stores its [`Claims`] in
//! the request extensions; `require_one_of_roles` then gates on the role.
//! Layer `require_auth` outside (after) the role gate so it runs first:
//!
//! ```ignore
//! Router::new()
//!     .route("/users", get(list))
//!     .route_layer(from_fn_with_state(AllowedRoles::one_of(&[UserRole::Admin]), require_one_of_roles))
//!     .route_layer(from_fn_with_state(tokens, require_auth))
//! ```
//!
//! The decisions themselves are the pure functions [`authenticate`] and
//! [`authorize`].

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Utc};

use crate::application::token::{Claims, TokenService};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Authentication
// ============================================================================

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// The header must split on a single space into exactly two parts, the
/// first being `Bearer`.
pub fn bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingBearerToken)?
        .to_str()
        .map_err(|_| AuthError::MalformedBearerToken)?;

    if value.is_empty() {
        return Err(AuthError::MissingBearerToken);
    }

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(*token),
        _ => Err(AuthError::MalformedBearerToken),
    }
}

/// Header → verified claims inside their validity window
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService, now: DateTime<Utc>) -> AuthResult<Claims> {
    let token = bearer_token(headers)?;
    let claims = tokens.verify(token)?;
    claims.check_window(now)?;
    Ok(claims)
}

/// Middleware that requires a valid bearer token
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = authenticate(req.headers(), &tokens, Utc::now())?;

    tracing::debug!(user_id = %claims.user_id, role = %claims.role_name, "Authenticated request");

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

// ============================================================================
// Authorization
// ============================================================================

/// Roles admitted by a [`require_one_of_roles`] layer
#[derive(Debug, Clone)]
pub struct AllowedRoles(Arc<[UserRole]>);

impl AllowedRoles {
    pub fn one_of(roles: &[UserRole]) -> Self {
        Self(roles.into())
    }

    pub fn as_slice(&self) -> &[UserRole] {
        &self.0
    }
}

/// Super admins always pass; anyone else needs one of `allowed`.
/// Missing claims fail closed.
pub fn authorize(claims: Option<&Claims>, allowed: &[UserRole]) -> AuthResult<()> {
    let claims = claims.ok_or(AuthError::InvalidToken)?;
    let role = claims.role_name;

    if role.implies_all_roles() || allowed.contains(&role) {
        Ok(())
    } else {
        tracing::debug!(user_id = %claims.user_id, role = %role, "Role not allowed");
        Err(AuthError::RoleNotAllowed)
    }
}

/// Middleware that requires the authenticated role to be in `allowed`.
/// Must run after [`require_auth`].
pub async fn require_one_of_roles(
    State(allowed): State<AllowedRoles>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    authorize(req.extensions().get::<Claims>(), allowed.as_slice())?;
    Ok(next.run(req).await)
}

// ============================================================================
// API key gate
// ============================================================================

/// Expected `x-api-key` secret
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(key.as_ref().into())
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Middleware that requires `x-api-key: Key <secret>`
pub async fn require_api_key(
    State(expected): State<ApiKey>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    platform::api_key::check_api_key(req.headers(), &expected.0)?;
    Ok(next.run(req).await)
}

// ============================================================================
// Extractor
// ============================================================================

/// Claims of the authenticated caller. Only usable behind [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or(AuthError::InvalidToken)
    }
}
