//! Server configuration read from the environment

use std::time::Duration;

use auth::AuthConfig;
use platform::config::{self, AppEnv, ConfigError};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug)]
pub struct AppConfig {
    pub env: AppEnv,
    pub port: u16,
    pub database_url: String,
    /// Required outside development
    pub api_key: Option<String>,
    pub auth: AuthConfig,
    pub password_pepper: Option<Vec<u8>>,
    pub frontend_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let env: AppEnv = config::parsed_or("APP_ENV", AppEnv::Development)?;
        let port = config::parsed_or("APP_PORT", DEFAULT_PORT)?;
        let database_url = config::required("DATABASE_URL")?;

        let api_key = if env.is_development() {
            config::optional("API_KEY")
        } else {
            Some(config::required("API_KEY")?)
        };

        let token_ttl = config::duration_or("JWT_EXP_TIME", DEFAULT_TOKEN_TTL)?;
        let auth = match config::optional("JWT_SECRET_KEY") {
            Some(secret) => AuthConfig::new(secret, token_ttl),
            None if env.is_development() => {
                tracing::warn!("JWT_SECRET_KEY not set, using a random secret; tokens will not survive a restart");
                AuthConfig {
                    token_ttl,
                    ..AuthConfig::with_random_secret()
                }
            }
            None => return Err(ConfigError::Missing("JWT_SECRET_KEY".to_string())),
        }
        .reject_duplicate_email(config::bool_or("REJECT_DUPLICATE_EMAIL", false)?);

        let password_pepper = config::optional("PASSWORD_PEPPER").map(String::into_bytes);

        let frontend_origins = parse_origins(
            &config::optional("FRONTEND_ORIGINS")
                .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string()),
        );

        Ok(Self {
            env,
            port,
            database_url,
            api_key,
            auth,
            password_pepper,
            frontend_origins,
        })
    }

    /// The `x-api-key` gate is on everywhere except development
    pub fn api_key_gate(&self) -> Option<&str> {
        if self.env.is_development() {
            None
        } else {
            self.api_key.as_deref()
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    fn config(env: AppEnv, api_key: Option<&str>) -> AppConfig {
        AppConfig {
            env,
            port: DEFAULT_PORT,
            database_url: "postgres://localhost/test".to_string(),
            api_key: api_key.map(str::to_string),
            auth: AuthConfig::new("secret", DEFAULT_TOKEN_TTL),
            password_pepper: None,
            frontend_origins: Vec::new(),
        }
    }

    #[test]
    fn test_api_key_gate_only_outside_development() {
        assert_eq!(config(AppEnv::Development, Some("k")).api_key_gate(), None);
        assert_eq!(config(AppEnv::Staging, Some("k")).api_key_gate(), Some("k"));
        assert_eq!(config(AppEnv::Production, Some("k")).api_key_gate(), Some("k"));
    }
}
