//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Columns selected for a [`UserRow`]
pub const USER_COLUMNS: &str =
    "id, name, email, password, role_id, created_at, updated_at, deleted_at";

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgAuthRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn create(&self, user: &User) -> AuthResult<UserId> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (
                id,
                name,
                email,
                password,
                role_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.id())
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(UserId::from_uuid(id))
    }
}

/// `23505 unique_violation`
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

// ============================================================================
// Row types
// ============================================================================

/// One `users` row as stored
#[derive(sqlx::FromRow)]
pub struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password: String,
    role_id: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl UserRow {
    pub fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_id(self.role_id)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role_id: {}", self.role_id)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.id),
            name: UserName::from_db(self.name),
            email: Email::from_db(self.email),
            password_hash: self.password,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}
