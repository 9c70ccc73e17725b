//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{LoginInput, RegisterInput};
use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Register response. `id` is the nil UUID when nothing was created.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: UserId,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        LoginInput {
            email: req.email,
            password: req.password,
        }
    }
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

// ============================================================================
// Me
// ============================================================================

/// Identity carried by the caller's token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: UserId,
    pub role_name: UserRole,
    pub expires_at: Option<DateTime<Utc>>,
}
