//! Repository port for the immutable completion history.

use crate::history::domain::{
    DailyStat, GroupStat, HistoryFilter, HistoryOrdering, HistoryRecord, HistoryRecordId,
    PageRequest, PriorityBreakdown, StatsWindow,
};
use crate::task::domain::{OwnerId, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for archive repository operations.
pub type ArchiveRepositoryResult<T> = Result<T, ArchiveRepositoryError>;

/// Completion history persistence contract.
///
/// Records are write-once: the port defines no update operation. Owner
/// scoping is part of every scan signature. Implementations MUST enforce
/// uniqueness of `source_task_id` at the storage layer; the service-level
/// existence check is a fast path, not the correctness guarantee.
#[async_trait]
pub trait ArchiveRepository: Send + Sync {
    /// Persists a new record and returns the stored row read back.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveRepositoryError::DuplicateRecord`] when the record
    /// ID already exists, or
    /// [`ArchiveRepositoryError::SourceTaskAlreadyArchived`] when a record
    /// for the same source task already exists.
    async fn insert(&self, record: &HistoryRecord) -> ArchiveRepositoryResult<HistoryRecord>;

    /// Finds a record by identifier.
    ///
    /// Returns `None` when the record does not exist.
    async fn find_by_id(
        &self,
        id: HistoryRecordId,
    ) -> ArchiveRepositoryResult<Option<HistoryRecord>>;

    /// Finds the record archived from the given source task, if any.
    async fn find_by_source_task(
        &self,
        source_task_id: TaskId,
    ) -> ArchiveRepositoryResult<Option<HistoryRecord>>;

    /// Returns `true` when a record for the source task already exists.
    async fn exists_by_source_task(
        &self,
        source_task_id: TaskId,
    ) -> ArchiveRepositoryResult<bool>;

    /// Returns the owner's records matching `filter`, ordered and paginated.
    async fn list_by_owner(
        &self,
        owner: &OwnerId,
        filter: &HistoryFilter,
        ordering: HistoryOrdering,
        page: PageRequest,
    ) -> ArchiveRepositoryResult<Vec<HistoryRecord>>;

    /// Counts the owner's records matching `filter`.
    async fn count_by_owner(
        &self,
        owner: &OwnerId,
        filter: &HistoryFilter,
    ) -> ArchiveRepositoryResult<u64>;

    /// Buckets the owner's completions by UTC calendar date.
    ///
    /// Entries are ordered date descending and capped at `limit` most
    /// recent dates.
    async fn daily_stats(
        &self,
        owner: &OwnerId,
        window: &StatsWindow,
        limit: u32,
    ) -> ArchiveRepositoryResult<Vec<DailyStat>>;

    /// Counts the owner's completions per priority, zero-filled.
    async fn priority_stats(
        &self,
        owner: &OwnerId,
        window: &StatsWindow,
    ) -> ArchiveRepositoryResult<PriorityBreakdown>;

    /// Counts the owner's completions per group label.
    ///
    /// Ungrouped records are reported under the
    /// [`crate::history::domain::GroupLabel::UNGROUPED`] sentinel. Entries
    /// are ordered count descending (label ascending as tie-break) and
    /// capped at `limit`.
    async fn group_stats(
        &self,
        owner: &OwnerId,
        window: &StatsWindow,
        limit: u32,
    ) -> ArchiveRepositoryResult<Vec<GroupStat>>;

    /// Deletes one record, returning the number of rows removed.
    ///
    /// A miss returns 0; it is not an error.
    async fn delete_by_id(&self, id: HistoryRecordId) -> ArchiveRepositoryResult<usize>;

    /// Deletes every record belonging to the owner, returning the number of
    /// rows removed.
    async fn delete_by_owner(&self, owner: &OwnerId) -> ArchiveRepositoryResult<usize>;
}

/// Errors returned by archive repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ArchiveRepositoryError {
    /// A record with the same identifier already exists.
    #[error("duplicate history record identifier: {0}")]
    DuplicateRecord(HistoryRecordId),

    /// A record for the same source task already exists.
    #[error("source task already archived: {0}")]
    SourceTaskAlreadyArchived(TaskId),

    /// Persistence-layer failure, tagged with the failing operation.
    #[error("archive store {operation} failed: {source}")]
    Persistence {
        /// The repository operation that failed.
        operation: &'static str,
        /// The underlying storage error.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl ArchiveRepositoryError {
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
