//! Auth Router

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use platform::password::PasswordHasher;

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Create the Auth router for any repository / hasher implementation
///
/// - `POST /register`
/// - `POST /login`
/// - `GET  /me` (bearer token required)
pub fn auth_router<R, H>(state: AuthAppState<R, H>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    H: PasswordHasher + ?Sized + 'static,
{
    let tokens = Arc::clone(&state.tokens);

    Router::new()
        .route("/register", post(handlers::register::<R, H>))
        .route("/login", post(handlers::login::<R, H>))
        .route(
            "/me",
            get(handlers::me).route_layer(from_fn_with_state(tokens, require_auth)),
        )
        .with_state(state)
}
