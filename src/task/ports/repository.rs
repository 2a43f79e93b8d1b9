//! Repository port for live task persistence, lookup, and counts.

use crate::task::domain::{
    OwnerId, PriorityCounts, StatusCounts, Task, TaskId, TaskListFilter,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Live task persistence contract.
///
/// Owner-scoped reads and deletes take the [`OwnerId`] explicitly so the
/// scoping is part of the signature, not a convention.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier within the owner's scope.
    ///
    /// Returns `None` when the task does not exist or belongs to another
    /// owner.
    async fn find_by_id(&self, owner: &OwnerId, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the owner's tasks matching `filter`, newest created first.
    async fn list_by_owner(
        &self,
        owner: &OwnerId,
        filter: &TaskListFilter,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Persists changes to an existing task (status, priority, fields).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task within the owner's scope.
    ///
    /// Returns `false` when nothing matched; a miss is not an error.
    async fn delete(&self, owner: &OwnerId, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Returns zero-filled per-status counts for the owner's tasks.
    async fn count_by_status(&self, owner: &OwnerId) -> TaskRepositoryResult<StatusCounts>;

    /// Returns zero-filled per-priority counts for the owner's tasks.
    async fn count_by_priority(&self, owner: &OwnerId) -> TaskRepositoryResult<PriorityCounts>;
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

    /// Persistence-layer failure, tagged with the failing operation.
    #[error("task store {operation} failed: {source}")]
    Persistence {
        /// The repository operation that failed.
        operation: &'static str,
        /// The underlying storage error.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl TaskRepositoryError {
    /// Wraps a persistence error with the name of the failing operation.
    pub fn persistence(
        operation: &'static str,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Persistence {
            operation,
            source: Arc::new(err),
        }
    }
}
