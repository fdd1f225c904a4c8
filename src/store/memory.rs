use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CredentialStore;
use crate::error::AppError;
use crate::models::{AuthToken, Task, TaskChanges, User};

/// A `CredentialStore` kept entirely in process memory.
///
/// Backs the test suite and lets the server run without `DATABASE_URL`.
/// Records are kept in vectors so listings come back in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    tasks: RwLock<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn task_count(&self) -> usize {
        self.tasks.read().await.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_user_by_token(
        &self,
        id: Uuid,
        access: &str,
        token: &str,
    ) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| {
                u.id == id
                    && u
                        .tokens
                        .iter()
                        .any(|t| t.access == access && t.token == token)
            })
            .cloned())
    }

    async fn push_token(&self, user_id: Uuid, token: &AuthToken) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(AppError::NotFound)?;
        if !user.tokens.iter().any(|t| t.token == token.token) {
            user.tokens.push(token.clone());
        }
        Ok(())
    }

    async fn pull_token(&self, user_id: Uuid, token: &str) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| u.id == user_id) {
            user.tokens.retain(|t| t.token != token);
        }
        Ok(())
    }

    async fn update_password_hash(
        &self,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(AppError::NotFound)?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn insert_task(&self, task: &Task) -> Result<(), AppError> {
        self.tasks.write().await.push(task.clone());
        Ok(())
    }

    async fn list_tasks(&self, owner_id: Uuid) -> Result<Vec<Task>, AppError> {
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_task(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Task>, AppError> {
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .find(|t| t.id == id && t.owner_id == owner_id)
            .cloned())
    }

    async fn delete_task(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        let position = tasks
            .iter()
            .position(|t| t.id == id && t.owner_id == owner_id);
        Ok(position.map(|index| tasks.remove(index)))
    }

    async fn update_task(
        &self,
        owner_id: Uuid,
        id: Uuid,
        changes: &TaskChanges,
    ) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks
            .iter_mut()
            .find(|t| t.id == id && t.owner_id == owner_id)
            .map(|task| {
                changes.apply(task);
                task.clone()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskInput;

    fn task_for(owner_id: Uuid, text: &str) -> Task {
        Task::new(
            TaskInput {
                text: text.to_string(),
            },
            owner_id,
        )
        .unwrap()
    }

    #[actix_rt::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        store
            .insert_user(&User::new("a@x.com".into(), "h".into()))
            .await
            .unwrap();

        let second = store
            .insert_user(&User::new("a@x.com".into(), "h2".into()))
            .await;
        assert!(matches!(second, Err(AppError::DuplicateEmail)));
        assert_eq!(store.user_count().await, 1);
    }

    #[actix_rt::test]
    async fn test_token_push_is_deduplicated_and_pull_is_idempotent() {
        let store = MemoryStore::new();
        let user = User::new("a@x.com".into(), "h".into());
        store.insert_user(&user).await.unwrap();

        let token = AuthToken::auth("t1");
        store.push_token(user.id, &token).await.unwrap();
        store.push_token(user.id, &token).await.unwrap();
        let stored = store.find_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(stored.tokens, vec![token]);

        store.pull_token(user.id, "t1").await.unwrap();
        store.pull_token(user.id, "t1").await.unwrap();
        let stored = store.find_user_by_email("a@x.com").await.unwrap().unwrap();
        assert!(stored.tokens.is_empty());
    }

    #[actix_rt::test]
    async fn test_find_user_by_token_checks_scope_and_owner() {
        let store = MemoryStore::new();
        let user = User::new("a@x.com".into(), "h".into());
        store.insert_user(&user).await.unwrap();
        store.push_token(user.id, &AuthToken::auth("t1")).await.unwrap();

        assert!(store
            .find_user_by_token(user.id, "auth", "t1")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_user_by_token(user.id, "reset", "t1")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_user_by_token(Uuid::new_v4(), "auth", "t1")
            .await
            .unwrap()
            .is_none());
    }

    #[actix_rt::test]
    async fn test_task_operations_are_owner_scoped() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let first = task_for(owner, "first");
        let second = task_for(owner, "second");
        store.insert_task(&first).await.unwrap();
        store.insert_task(&second).await.unwrap();
        store.insert_task(&task_for(stranger, "theirs")).await.unwrap();

        let listed = store.list_tasks(owner).await.unwrap();
        assert_eq!(listed, vec![first.clone(), second.clone()]);

        assert!(store.find_task(stranger, first.id).await.unwrap().is_none());
        assert!(store.delete_task(stranger, first.id).await.unwrap().is_none());
        let changes = TaskChanges {
            text: Some("hijacked".into()),
            completed: true,
            completed_at: Some(1),
        };
        assert!(store
            .update_task(stranger, first.id, &changes)
            .await
            .unwrap()
            .is_none());
        assert_eq!(store.find_task(owner, first.id).await.unwrap(), Some(first.clone()));

        let deleted = store.delete_task(owner, first.id).await.unwrap();
        assert_eq!(deleted, Some(first));
        assert_eq!(store.task_count().await, 2);
    }
}
