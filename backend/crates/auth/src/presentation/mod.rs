//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{
    AllowedRoles, ApiKey, AuthUser, authenticate, authorize, require_api_key, require_auth,
    require_one_of_roles,
};
pub use router::auth_router;
