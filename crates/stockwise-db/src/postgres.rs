use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use stockwise_core::AppError;
use stockwise_models::{User, UserId};
use stockwise_permissions::{PermissionStore, Role};
use tracing::instrument;

use crate::repository::UserRepository;

const USER_COLUMNS: &str =
    "id, name, email, role, permissions, module_access, created_at, updated_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    email: String,
    role: String,
    permissions: Option<serde_json::Value>,
    module_access: Option<Vec<String>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            role: Role::parse_lenient(&row.role),
            // Stored JSON is not trusted to match the current shape.
            permissions: row.permissions.as_ref().map(PermissionStore::from_value),
            module_access: row.module_access,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::database)?;

        Ok(row.map(User::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY name, email"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::database)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, user: User) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, name, email, role, permissions, module_access, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(user.permissions.as_ref().map(PermissionStore::to_value))
        .bind(&user.module_access)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "User with email {} already exists",
                        user.email
                    ));
                }
            }
            AppError::database(e)
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, permissions))]
    async fn save_permissions(
        &self,
        id: UserId,
        permissions: &PermissionStore,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE users SET permissions = $1, updated_at = NOW() WHERE id = $2")
                .bind(permissions.to_value())
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(AppError::database)?;

        Ok(result.rows_affected() > 0)
    }
}
