//! PostgreSQL Repository Implementation

use auth::infra::postgres::{USER_COLUMNS, UserRow, is_unique_violation};
use auth::models::{Email, User, UserId};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::query::ListQuery;
use crate::domain::repository::UserAdminRepository;
use crate::error::{UserError, UserResult};

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `SELECT ... FROM users WHERE ...` for a list query, without paging
pub(crate) fn list_query_builder(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users WHERE TRUE"));

    if !query.include_deleted {
        builder.push(" AND deleted_at IS NULL");
    }

    if let Some(pattern) = query.search_pattern() {
        builder
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR email ILIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }

    // Column and direction come from closed enums
    builder.push(format!(
        " ORDER BY {} {}, id {}",
        query.sort_by.column(),
        query.order.sql(),
        query.order.sql()
    ));

    builder
}

fn map_write_error(err: sqlx::Error) -> UserError {
    if is_unique_violation(&err) {
        UserError::EmailTaken
    } else {
        UserError::Database(err)
    }
}

impl UserAdminRepository for PgUserRepository {
    async fn list(&self, query: &ListQuery) -> UserResult<Vec<User>> {
        let mut builder = list_query_builder(query);
        builder
            .push(" LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset());

        let rows = builder
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| row.into_user().map_err(UserError::from))
            .collect()
    }

    async fn count(&self, include_deleted: bool) -> UserResult<i64> {
        let sql = if include_deleted {
            "SELECT COUNT(*) FROM users"
        } else {
            "SELECT COUNT(*) FROM users WHERE deleted_at IS NULL"
        };

        let count = sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn find_by_id(&self, user_id: &UserId) -> UserResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user).transpose()?)
    }

    async fn find_by_email(&self, email: &Email) -> UserResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user).transpose()?)
    }

    async fn create(&self, user: &User) -> UserResult<UserId> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (id, name, email, password, role_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
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
        .map_err(map_write_error)?;

        Ok(UserId::from_uuid(id))
    }

    async fn update(&self, user: &User) -> UserResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                password = $4,
                updated_at = $5
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete(&self, user_id: &UserId) -> UserResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn hard_delete(&self, user_id: &UserId) -> UserResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn restore(&self, user_id: &UserId) -> UserResult<bool> {
        // Fails with a unique violation if the email was reused meanwhile
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NULL, updated_at = NOW() WHERE id = $1",
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::{SortField, SortOrder};

    #[test]
    fn test_default_list_sql() {
        let builder = list_query_builder(&ListQuery::default());
        assert_eq!(
            builder.sql(),
            "SELECT id, name, email, password, role_id, created_at, updated_at, deleted_at \
             FROM users WHERE TRUE AND deleted_at IS NULL ORDER BY created_at DESC, id DESC"
        );
    }

    #[test]
    fn test_search_and_sort_sql() {
        let query = ListQuery {
            include_deleted: true,
            search: Some("active".to_string()),
            sort_by: SortField::Email,
            order: SortOrder::Asc,
            ..Default::default()
        };
        let sql = list_query_builder(&query).sql().to_string();

        assert!(!sql.contains("deleted_at IS NULL"));
        assert!(sql.contains("(name ILIKE $1 ESCAPE '\\' OR email ILIKE $2 ESCAPE '\\')"));
        assert!(sql.ends_with("ORDER BY email ASC, id ASC"));
    }
}
