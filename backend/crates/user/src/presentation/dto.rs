//! API DTOs (Data Transfer Objects)

use auth::models::{User, UserId, UserRole};
use chrono::{DateTime, Utc};
use kernel::validation::FieldErrors;
use serde::{Deserialize, Serialize};

use crate::application::{CreateUserInput, UpdateUserInput};
use crate::domain::query::{ListQuery, MAX_LIMIT};

// ============================================================================
// List
// ============================================================================

/// Raw `GET /users` query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersParams {
    pub limit: Option<i64>,
    pub page: Option<i64>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub include_deleted: Option<bool>,
    pub search: Option<String>,
}

impl TryFrom<ListUsersParams> for ListQuery {
    type Error = FieldErrors;

    fn try_from(params: ListUsersParams) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let mut query = ListQuery::default();

        match params.limit {
            Some(limit) if (1..=MAX_LIMIT).contains(&limit) => query.limit = limit,
            Some(_) => errors.add("limit", format!("must be between 1 and {MAX_LIMIT}")),
            None => {}
        }

        match params.page {
            Some(page) if page >= 1 => query.page = page,
            Some(_) => errors.add("page", "must be at least 1"),
            None => {}
        }

        if let Some(sort_by) = params.sort_by.as_deref().filter(|s| !s.is_empty()) {
            match sort_by.parse() {
                Ok(field) => query.sort_by = field,
                Err(msg) => errors.add("sortBy", msg),
            }
        }

        if let Some(order) = params.order.as_deref().filter(|s| !s.is_empty()) {
            match order.parse() {
                Ok(order) => query.order = order,
                Err(msg) => errors.add("order", msg),
            }
        }

        query.include_deleted = params.include_deleted.unwrap_or(false);
        query.search = params
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        errors.into_result().map(|_| query)
    }
}

/// List response
#[derive(Debug, Clone, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
}

// ============================================================================
// Single user
// ============================================================================

/// Public view of a user. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role_id: i16,
    pub role_name: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role_id: user.role.id(),
            role_name: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
            deleted_at: user.deleted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

/// Mutation response
#[derive(Debug, Clone, Serialize)]
pub struct IdResponse {
    pub id: UserId,
}

// ============================================================================
// Create / Update
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role_id: Option<i16>,
}

impl From<CreateUserRequest> for CreateUserInput {
    fn from(req: CreateUserRequest) -> Self {
        CreateUserInput {
            name: req.name,
            email: req.email,
            password: req.password,
            role_id: req.role_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(req: UpdateUserRequest) -> Self {
        UpdateUserInput {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::{SortField, SortOrder};
    use crate::test_support::user;

    #[test]
    fn test_params_defaults() {
        let query = ListQuery::try_from(ListUsersParams::default()).unwrap();
        assert_eq!(query, ListQuery::default());
    }

    #[test]
    fn test_params_parsed() {
        let query = ListQuery::try_from(ListUsersParams {
            limit: Some(25),
            page: Some(3),
            sort_by: Some("email".into()),
            order: Some("ASC".into()),
            include_deleted: Some(true),
            search: Some("  admin ".into()),
        })
        .unwrap();

        assert_eq!(query.limit, 25);
        assert_eq!(query.page, 3);
        assert_eq!(query.sort_by, SortField::Email);
        assert_eq!(query.order, SortOrder::Asc);
        assert!(query.include_deleted);
        assert_eq!(query.search.as_deref(), Some("admin"));
    }

    #[test]
    fn test_params_collect_every_error() {
        let errors = ListQuery::try_from(ListUsersParams {
            limit: Some(0),
            page: Some(0),
            sort_by: Some("password".into()),
            order: Some("sideways".into()),
            ..Default::default()
        })
        .unwrap_err();

        for field in ["limit", "page", "sortBy", "order"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_limit_upper_bound() {
        let errors = ListQuery::try_from(ListUsersParams {
            limit: Some(MAX_LIMIT + 1),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(errors.messages("limit"), ["must be between 1 and 100"]);
    }

    #[test]
    fn test_user_response_hides_password() {
        let body = serde_json::to_value(UserResponse::from(user("Jane", "jane@example.com"))).unwrap();

        assert_eq!(body["email"], "jane@example.com");
        assert_eq!(body["roleId"], 4);
        assert_eq!(body["roleName"], "user");
        assert!(body["deletedAt"].is_null());
        assert!(body.get("password").is_none());
        assert!(body.get("passwordHash").is_none());
    }
}
