//! Persistence behind the user directory and the task repository.
//!
//! `CredentialStore` is the only way the rest of the crate touches stored data.
//! Every task operation is keyed by `(owner_id, id)` so that ownership is enforced
//! by the lookup itself, never by a check done after reading someone else's record.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{AuthToken, Task, TaskChanges, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persists a new user. Fails with `AppError::DuplicateEmail` if the email is taken.
    async fn insert_user(&self, user: &User) -> Result<(), AppError>;

    /// Exact-match lookup.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Finds the user `id` only if `token` is listed on it with scope `access`.
    async fn find_user_by_token(
        &self,
        id: Uuid,
        access: &str,
        token: &str,
    ) -> Result<Option<User>, AppError>;

    /// Appends `token` to the user's token list unless the same value is already there.
    async fn push_token(&self, user_id: Uuid, token: &AuthToken) -> Result<(), AppError>;

    /// Removes every entry whose value is `token`. Removing an absent token is not an error.
    async fn pull_token(&self, user_id: Uuid, token: &str) -> Result<(), AppError>;

    async fn update_password_hash(&self, user_id: Uuid, password_hash: &str)
        -> Result<(), AppError>;

    async fn insert_task(&self, task: &Task) -> Result<(), AppError>;

    /// Tasks of `owner_id` in insertion order.
    async fn list_tasks(&self, owner_id: Uuid) -> Result<Vec<Task>, AppError>;

    async fn find_task(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Task>, AppError>;

    /// Deletes the task and returns it as it was before deletion.
    async fn delete_task(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Task>, AppError>;

    /// Writes `changes` and returns the updated task.
    async fn update_task(
        &self,
        owner_id: Uuid,
        id: Uuid,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, AppError>;
}
