use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskChanges, TaskInput, TaskPatch};
use crate::store::CredentialStore;

/// CRUD over tasks, every operation scoped to the calling owner.
///
/// A task that exists but belongs to someone else is reported as
/// `AppError::NotFound`, exactly like a task that does not exist.
pub struct TaskRepository {
    store: Arc<dyn CredentialStore>,
}

impl TaskRepository {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, owner_id: Uuid, input: TaskInput) -> Result<Task, AppError> {
        let task = Task::new(input, owner_id)?;
        self.store.insert_task(&task).await?;
        Ok(task)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Task>, AppError> {
        self.store.list_tasks(owner_id).await
    }

    pub async fn get_by_id_for_owner(&self, owner_id: Uuid, id: Uuid) -> Result<Task, AppError> {
        self.store
            .find_task(owner_id, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Deletes the task and returns its last state.
    pub async fn delete_by_id_for_owner(&self, owner_id: Uuid, id: Uuid) -> Result<Task, AppError> {
        self.store
            .delete_task(owner_id, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Applies `patch` following the completion rule in `TaskChanges::from_patch`.
    pub async fn update_by_id_for_owner(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: TaskPatch,
    ) -> Result<Task, AppError> {
        let changes = TaskChanges::from_patch(patch, Utc::now().timestamp_millis())?;
        self.store
            .update_task(owner_id, id, &changes)
            .await?
            .ok_or(AppError::NotFound)
    }
}
