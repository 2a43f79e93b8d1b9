//! Service layer for the task-to-history archival transition.

use crate::history::{
    domain::{GroupLabel, HistoryRecord, HistoryRecordDraft, HistoryValidationError},
    ports::{ArchiveRepository, ArchiveRepositoryError},
};
use crate::task::domain::{OwnerId, Task, TaskId};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for archival operations.
#[derive(Debug, Error)]
pub enum ArchivalError {
    /// The source task has already been archived.
    ///
    /// An expected, user-facing outcome: archival is idempotent by
    /// rejection, never by merge. Distinguish it from
    /// [`ArchivalError::Repository`] when choosing a response.
    #[error("task already archived: {0}")]
    AlreadyArchived(TaskId),

    /// The record draft failed validation.
    #[error(transparent)]
    Validation(#[from] HistoryValidationError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(ArchiveRepositoryError),
}

impl From<ArchiveRepositoryError> for ArchivalError {
    fn from(err: ArchiveRepositoryError) -> Self {
        match err {
            // The storage-layer uniqueness rejection is the race-free form
            // of the same outcome the fast-path check reports.
            ArchiveRepositoryError::SourceTaskAlreadyArchived(task_id) => {
                Self::AlreadyArchived(task_id)
            }
            other => Self::Repository(other),
        }
    }
}

/// Result type for archival service operations.
pub type ArchivalResult<T> = Result<T, ArchivalError>;

/// Orchestrates the one-time copy of a completed task into the history.
///
/// This service is the only writer of history records; nothing else in the
/// crate creates one.
#[derive(Clone)]
pub struct ArchivalService<R, C>
where
    R: ArchiveRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ArchivalService<R, C>
where
    R: ArchiveRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new archival service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Copies `task` into the history under `group_label`.
    ///
    /// The record's completion moment is the task's own `completed_at`, or
    /// the current time for tasks that reached archival without passing
    /// through the normal done transition.
    ///
    /// # Errors
    ///
    /// Returns [`ArchivalError::AlreadyArchived`] when a record for the
    /// task already exists, whether from the fast-path existence check or
    /// from the storage-layer uniqueness constraint when two attempts race.
    pub async fn archive(
        &self,
        task: &Task,
        group_label: Option<&GroupLabel>,
    ) -> ArchivalResult<HistoryRecord> {
        if self.repository.exists_by_source_task(task.id()).await? {
            return Err(ArchivalError::AlreadyArchived(task.id()));
        }

        let now = self.clock.utc();
        let completed_at = task.completed_at().unwrap_or(now);
        let record =
            HistoryRecordDraft::from_task(task, group_label, completed_at, now).build()?;
        let persisted = self.repository.insert(&record).await?;
        debug!(
            source_task_id = %task.id(),
            record_id = %persisted.id(),
            "task archived"
        );
        Ok(persisted)
    }

    /// Returns `true` when the task has already been archived.
    ///
    /// # Errors
    ///
    /// Returns [`ArchivalError::Repository`] when the existence check
    /// fails.
    pub async fn is_archived(&self, source_task_id: TaskId) -> ArchivalResult<bool> {
        Ok(self
            .repository
            .exists_by_source_task(source_task_id)
            .await?)
    }

    /// Removes the archival trace of a task, e.g. when the task is
    /// permanently purged.
    ///
    /// Returns `false` when no record exists for the task or the record
    /// belongs to a different owner.
    ///
    /// # Errors
    ///
    /// Returns [`ArchivalError::Repository`] when lookup or deletion fails.
    pub async fn delete_archive_for_task(
        &self,
        source_task_id: TaskId,
        owner: &OwnerId,
    ) -> ArchivalResult<bool> {
        let Some(record) = self.repository.find_by_source_task(source_task_id).await? else {
            return Ok(false);
        };
        if record.owner_id() != owner {
            return Ok(false);
        }
        let removed = self.repository.delete_by_id(record.id()).await? > 0;
        if removed {
            debug!(%source_task_id, record_id = %record.id(), "archive record removed");
        }
        Ok(removed)
    }
}
