//! Access Token Issuer / Verifier
//!
//! HS256 JWTs carrying the user's id and role. Verification and the time
//! window are separate steps: [`TokenService::verify`] checks structure,
//! signature, issuer and audience, then [`Claims::check_window`] tells a
//! not-yet-valid token apart from an expired one.

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: i64,
    pub nbf: i64,
    pub iat: i64,
    pub jti: String,
    pub user_id: UserId,
    pub role_name: UserRole,
}

impl Claims {
    /// Accept only when `nbf <= now <= exp`
    pub fn check_window(&self, now: DateTime<Utc>) -> AuthResult<()> {
        let now = now.timestamp();
        if self.nbf > now {
            return Err(AuthError::TokenNotActive);
        }
        if self.exp < now {
            return Err(AuthError::TokenExpired);
        }
        Ok(())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Signs and verifies access tokens. Built once at startup and shared
/// behind an `Arc`.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
    issuer: String,
    audience: String,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.set_required_spec_claims(&["exp", "nbf", "iat", "iss", "aud", "sub"]);
        // Time window is checked by `Claims::check_window`
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs: config.token_ttl_secs(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    /// Issue a token valid from now for the configured TTL
    pub fn issue(&self, user_id: UserId, role: UserRole) -> AuthResult<String> {
        self.issue_at(user_id, role, Utc::now())
    }

    /// Issue a token whose window starts at `now`
    pub fn issue_at(&self, user_id: UserId, role: UserRole, now: DateTime<Utc>) -> AuthResult<String> {
        let iat = now.timestamp();
        let claims = Claims {
            iss: self.issuer.clone(),
            sub: user_id.to_string(),
            aud: self.audience.clone(),
            exp: iat.saturating_add(self.ttl_secs),
            nbf: iat,
            iat,
            jti: Uuid::new_v4().to_string(),
            user_id,
            role_name: role,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::Signing)
    }

    /// Check structure, signature, issuer and audience. Does not look at
    /// `nbf`/`exp`.
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "JWT validation failed");
                AuthError::InvalidToken
            })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.ttl_secs)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn service(secret: &str) -> TokenService {
        TokenService::new(&AuthConfig::new(secret, std::time::Duration::from_secs(3600)))
    }

    #[test]
    fn test_issue_then_verify_recovers_identity() {
        let tokens = service("test_secret");
        let user_id = UserId::new();

        let token = tokens.issue(user_id, UserRole::Admin).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role_name, UserRole::Admin);
        assert_eq!(claims.iss, "hackathon-starter");
        assert_eq!(claims.aud, "hackathon-starter");
        assert_eq!(claims.iat, claims.nbf);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(claims.check_window(Utc::now()).is_ok());
    }

    #[test]
    fn test_each_token_gets_fresh_jti() {
        let tokens = service("test_secret");
        let user_id = UserId::new();
        let a = tokens.verify(&tokens.issue(user_id, UserRole::User).unwrap()).unwrap();
        let b = tokens.verify(&tokens.issue(user_id, UserRole::User).unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
        assert_eq!(Uuid::parse_str(&a.jti).unwrap().get_version_num(), 4);
    }

    #[test]
    fn test_other_secret_is_invalid_token() {
        let token = service("secret_a").issue(UserId::new(), UserRole::User).unwrap();
        let result = service("secret_b").verify(&token);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_garbage_is_invalid_token() {
        let tokens = service("test_secret");
        assert!(matches!(tokens.verify("token123"), Err(AuthError::InvalidToken)));
        assert!(matches!(tokens.verify(""), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_tampered_payload_is_invalid_token() {
        let tokens = service("test_secret");
        let token = tokens.issue(UserId::new(), UserRole::User).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = tokens.issue(UserId::new(), UserRole::SuperAdmin).unwrap();
        let forged_payload = forged.split('.').nth(1).unwrap().to_string();
        parts[1] = &forged_payload;
        let spliced = parts.join(".");

        assert!(matches!(tokens.verify(&spliced), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_wrong_audience_is_invalid_token() {
        let mut config = AuthConfig::new("test_secret", std::time::Duration::from_secs(3600));
        config.audience = "someone-else".to_string();
        let token = TokenService::new(&config).issue(UserId::new(), UserRole::User).unwrap();

        assert!(matches!(service("test_secret").verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_verifies_but_fails_window() {
        let tokens = service("test_secret");
        let issued = Utc::now() - Duration::hours(2);
        let token = tokens.issue_at(UserId::new(), UserRole::User, issued).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert!(matches!(claims.check_window(Utc::now()), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_future_token_is_not_active() {
        let tokens = service("test_secret");
        let issued = Utc::now() + Duration::minutes(10);
        let token = tokens.issue_at(UserId::new(), UserRole::User, issued).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert!(matches!(claims.check_window(Utc::now()), Err(AuthError::TokenNotActive)));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let tokens = service("test_secret");
        let now = Utc::now();
        let token = tokens.issue_at(UserId::new(), UserRole::User, now).unwrap();
        let claims = tokens.verify(&token).unwrap();

        let nbf = DateTime::from_timestamp(claims.nbf, 0).unwrap();
        let exp = claims.expires_at().unwrap();
        assert!(claims.check_window(nbf).is_ok());
        assert!(claims.check_window(exp).is_ok());
        assert!(matches!(
            claims.check_window(exp + Duration::seconds(1)),
            Err(AuthError::TokenExpired)
        ));
    }
}
