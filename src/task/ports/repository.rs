//! Repository port for task record persistence.

use crate::task::domain::{Task, TaskChanges, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every operation is atomic for a single record and durable before it
/// returns. Implementations hold no business policy: they never decide
/// whether a summary is needed.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a newly created task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Applies `changes` to the stored task, sets `updated_at` to `at`, and
    /// returns the record as it was before and after the write.
    ///
    /// Both views are read under the same per-record lock.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(
        &self,
        id: TaskId,
        changes: &TaskChanges,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<TaskUpdate>;

    /// Permanently removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// A record before and after one atomic update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    /// The record as stored before the changes were applied.
    pub previous: Task,
    /// The record as persisted.
    pub current: Task,
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
