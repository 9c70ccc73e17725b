//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration and login with email + password
//! - HS256 bearer tokens carrying user id and role
//! - `require_auth` / `require_one_of_roles` middleware
//! - Roles: SuperAdmin, Admin, Staff, User (SuperAdmin passes every gate)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id off the async executor
//! - Tokens are stateless; acceptance requires `nbf <= now <= exp`
//! - No refresh or revocation

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{Claims, TokenService};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::user::User;
    pub use crate::domain::value_object::{
        email::Email, user_id::UserId, user_name::UserName, user_role::UserRole,
    };
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
