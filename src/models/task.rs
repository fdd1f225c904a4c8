use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// A to-do record owned by exactly one user.
///
/// `completed_at` (epoch milliseconds) is `Some` exactly when `completed` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub completed_at: Option<i64>,
    pub owner_id: Uuid,
}

impl Task {
    /// Creates a new, not yet completed task. Text is stored trimmed.
    pub fn new(input: TaskInput, owner_id: Uuid) -> Result<Self, AppError> {
        let input = input.normalized();
        input.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            text: input.text,
            completed: false,
            completed_at: None,
            owner_id,
        })
    }
}

/// Body of `POST /todos`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaskInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

impl TaskInput {
    fn normalized(self) -> Self {
        Self {
            text: self.text.trim().to_string(),
        }
    }
}

/// Body of `PATCH /todos/:id`.
///
/// Only `text` and `completed` are read; any other field, including
/// `completedAt`, is ignored. A `completed` value that is not a JSON boolean
/// counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub text: Option<String>,
    #[serde(default, deserialize_with = "bool_or_none")]
    pub completed: Option<bool>,
}

fn bool_or_none<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(flag)) => Some(flag),
        _ => None,
    })
}

/// The fields an update writes, after the completion transition rule is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    pub text: Option<String>,
    pub completed: bool,
    pub completed_at: Option<i64>,
}

impl TaskChanges {
    /// Resolves a patch at time `now_ms`.
    ///
    /// `completed: true` stamps `completed_at` with `now_ms`; anything else,
    /// including an absent `completed`, resets the task to not completed.
    pub fn from_patch(patch: TaskPatch, now_ms: i64) -> Result<Self, AppError> {
        let text = match patch.text {
            Some(text) => {
                let input = TaskInput { text }.normalized();
                input.validate()?;
                Some(input.text)
            }
            None => None,
        };

        let (completed, completed_at) = match patch.completed {
            Some(true) => (true, Some(now_ms)),
            _ => (false, None),
        };

        Ok(Self {
            text,
            completed,
            completed_at,
        })
    }

    pub fn apply(&self, task: &mut Task) {
        if let Some(text) = &self.text {
            task.text = text.clone();
        }
        task.completed = self.completed;
        task.completed_at = self.completed_at;
    }
}
