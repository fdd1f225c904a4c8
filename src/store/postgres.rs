use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use super::CredentialStore;
use crate::error::AppError;
use crate::models::{AuthToken, Task, TaskChanges, User};

const USER_COLUMNS: &str = "id, email, password_hash, tokens";
const TASK_COLUMNS: &str = "id, text, completed, completed_at, owner_id";

/// `CredentialStore` backed by PostgreSQL.
///
/// A user's tokens live in a JSONB array on the user row. Appends and removals
/// are single `UPDATE` statements, so concurrent logins for the same user do not
/// overwrite each other's tokens.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    tokens: Json<Vec<AuthToken>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            tokens: row.tokens.0,
        }
    }
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let result = sqlx::query(
            "INSERT INTO users (id, email, password_hash, tokens) VALUES ($1, $2, $3, $4)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Json(&user.tokens))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_token(
        &self,
        id: Uuid,
        access: &str,
        token: &str,
    ) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {} FROM users WHERE id = $1 \
             AND tokens @> jsonb_build_array(jsonb_build_object('access', $2::text, 'token', $3::text))",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(access)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn push_token(&self, user_id: Uuid, token: &AuthToken) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users \
             SET tokens = tokens || jsonb_build_array(jsonb_build_object('access', $2::text, 'token', $3::text)) \
             WHERE id = $1 \
             AND NOT tokens @> jsonb_build_array(jsonb_build_object('token', $3::text))",
        )
        .bind(user_id)
        .bind(&token.access)
        .bind(&token.token)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn pull_token(&self, user_id: Uuid, token: &str) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users \
             SET tokens = COALESCE( \
                 (SELECT jsonb_agg(entry) FROM jsonb_array_elements(tokens) AS entry \
                  WHERE entry->>'token' <> $2), \
                 '[]'::jsonb) \
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(token)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_password_hash(
        &self,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(user_id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn insert_task(&self, task: &Task) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO tasks (id, text, completed, completed_at, owner_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(task.id)
        .bind(&task.text)
        .bind(task.completed)
        .bind(task.completed_at)
        .bind(task.owner_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_tasks(&self, owner_id: Uuid) -> Result<Vec<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE owner_id = $1 ORDER BY seq",
            TASK_COLUMNS
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn find_task(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE id = $1 AND owner_id = $2",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn delete_task(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "DELETE FROM tasks WHERE id = $1 AND owner_id = $2 RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn update_task(
        &self,
        owner_id: Uuid,
        id: Uuid,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "UPDATE tasks \
             SET text = COALESCE($3, text), completed = $4, completed_at = $5 \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(owner_id)
            .bind(changes.text.as_deref())
            .bind(changes.completed)
            .bind(changes.completed_at)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }
}
