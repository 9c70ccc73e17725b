//! Router assembly

use std::sync::Arc;

use auth::middleware::{ApiKey, require_api_key};
use auth::{AuthConfig, PgAuthRepository, TokenService, auth_router, presentation::AuthAppState};
use axum::{
    Router, http,
    http::{Method, header},
    middleware::from_fn_with_state,
    routing::get,
};
use kernel::error::app_error::AppError;
use kernel::response::Payload;
use platform::password::{Argon2Hasher, PasswordHasher};
use sqlx::PgPool;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use user::{PgUserRepository, UserAppState, user_router};

use crate::config::AppConfig;

/// Build the full application router on top of a connected pool
pub fn build(config: &AppConfig, pool: PgPool) -> Router {
    let hasher: Arc<dyn PasswordHasher> =
        Arc::new(Argon2Hasher::new(config.password_pepper.clone()));
    let auth_config: Arc<AuthConfig> = Arc::new(config.auth.clone());
    let tokens = Arc::new(TokenService::new(&auth_config));

    let auth_state = AuthAppState {
        repo: Arc::new(PgAuthRepository::new(pool.clone())),
        hasher: hasher.clone(),
        tokens: tokens.clone(),
        config: auth_config,
    };
    let user_state = UserAppState {
        repo: Arc::new(PgUserRepository::new(pool)),
        hasher,
    };

    let api = Router::new()
        .route("/", get(health))
        .nest("/auth", auth_router(auth_state))
        .nest("/users", user_router(user_state, tokens));

    let app = Router::new()
        .route("/", get(health))
        .nest("/api/v1", api)
        .fallback(not_found);

    with_layers(app, config.api_key_gate(), &config.frontend_origins)
}

/// API key gate (when enabled), request tracing, then CORS outermost so
/// preflight requests never need a key.
pub fn with_layers(app: Router, api_key: Option<&str>, origins: &[String]) -> Router {
    let app = match api_key {
        Some(key) => app.layer(from_fn_with_state(ApiKey::new(key), require_api_key)),
        None => app,
    };

    app.layer(TraceLayer::new_for_http())
        .layer(cors_layer(origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::HeaderName::from_static(platform::api_key::API_KEY_HEADER),
        ]))
        .allow_credentials(true)
}

/// GET / and GET /api/v1/
async fn health() -> Payload<&'static str> {
    Payload::new("ok")
}

async fn not_found() -> AppError {
    AppError::not_found("route not found")
}
