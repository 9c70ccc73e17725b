//! User Management Router

use std::sync::Arc;

use auth::TokenService;
use auth::middleware::{AllowedRoles, require_auth, require_one_of_roles};
use auth::models::UserRole;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use platform::password::PasswordHasher;

use crate::domain::repository::UserAdminRepository;
use crate::presentation::handlers::{self, UserAppState};

/// Create the admin user router. Every route requires a bearer token with
/// the `admin` role (super admins pass as well).
///
/// - `GET    /` list, `POST /` create
/// - `GET    /stats`
/// - `GET    /{id}`, `PATCH /{id}`, `DELETE /{id}` (soft)
/// - `DELETE /{id}/permanent`
/// - `POST   /{id}/restore`
pub fn user_router<R, H>(state: UserAppState<R, H>, tokens: Arc<TokenService>) -> Router
where
    R: UserAdminRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    Router::new()
        .route(
            "/",
            get(handlers::list_users::<R, H>).post(handlers::create_user::<R, H>),
        )
        .route("/stats", get(handlers::user_stats::<R, H>))
        .route(
            "/{id}",
            get(handlers::get_user::<R, H>)
                .patch(handlers::update_user::<R, H>)
                .delete(handlers::soft_delete_user::<R, H>),
        )
        .route("/{id}/permanent", delete(handlers::hard_delete_user::<R, H>))
        .route("/{id}/restore", post(handlers::restore_user::<R, H>))
        // Outermost layer runs first: authenticate, then check the role
        .route_layer(from_fn_with_state(
            AllowedRoles::one_of(&[UserRole::Admin]),
            require_one_of_roles,
        ))
        .route_layer(from_fn_with_state(tokens, require_auth))
        .with_state(state)
}
