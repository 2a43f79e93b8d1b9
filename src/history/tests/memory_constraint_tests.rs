//! Uniqueness and lookup tests for the in-memory archive repository.

use std::sync::Arc;

use crate::history::{
    adapters::memory::InMemoryArchiveRepository,
    domain::{HistoryRecord, HistoryRecordDraft, HistoryRecordId},
    ports::{ArchiveRepository, ArchiveRepositoryError},
};
use crate::task::domain::{TaskId, TaskPriority};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> Arc<InMemoryArchiveRepository> {
    Arc::new(InMemoryArchiveRepository::new())
}

fn record_for(source_task_id: TaskId) -> HistoryRecord {
    let completed_at = Utc
        .with_ymd_and_hms(2026, 4, 2, 18, 0, 0)
        .single()
        .expect("valid timestamp");
    HistoryRecordDraft::new(
        "alice",
        source_task_id,
        "Archived task",
        TaskPriority::Medium,
        completed_at,
        completed_at,
    )
    .build()
    .expect("valid draft")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_reads_back_the_persisted_record(repository: Arc<InMemoryArchiveRepository>) {
    let record = record_for(TaskId::new());

    let persisted = repository
        .insert(&record)
        .await
        .expect("insert should succeed");
    assert_eq!(persisted, record);

    let found = repository
        .find_by_id(record.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(found, Some(record));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_rejects_a_duplicate_record_identifier(
    repository: Arc<InMemoryArchiveRepository>,
) {
    let record = record_for(TaskId::new());
    repository
        .insert(&record)
        .await
        .expect("insert should succeed");

    let colliding = HistoryRecordDraft::new(
        "alice",
        TaskId::new(),
        "Different source, same id",
        TaskPriority::Low,
        record.completed_at(),
        record.created_at(),
    )
    .with_id(record.id())
    .build()
    .expect("valid draft");

    let result = repository.insert(&colliding).await;
    assert!(matches!(
        result,
        Err(ArchiveRepositoryError::DuplicateRecord(id)) if id == record.id()
    ));
}

/// A fresh record identifier does not get around the source-task
/// uniqueness guarantee; this is the constraint the archival guard relies
/// on under concurrency.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_rejects_a_second_record_for_the_same_source_task(
    repository: Arc<InMemoryArchiveRepository>,
) {
    let source_task_id = TaskId::new();
    repository
        .insert(&record_for(source_task_id))
        .await
        .expect("insert should succeed");

    let result = repository.insert(&record_for(source_task_id)).await;
    assert!(matches!(
        result,
        Err(ArchiveRepositoryError::SourceTaskAlreadyArchived(id)) if id == source_task_id
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn source_task_lookups_cover_hits_and_misses(
    repository: Arc<InMemoryArchiveRepository>,
) {
    let source_task_id = TaskId::new();
    let record = record_for(source_task_id);
    repository
        .insert(&record)
        .await
        .expect("insert should succeed");

    let found = repository
        .find_by_source_task(source_task_id)
        .await
        .expect("lookup should succeed");
    assert_eq!(found.map(|hit| hit.id()), Some(record.id()));
    assert!(repository
        .exists_by_source_task(source_task_id)
        .await
        .expect("check should succeed"));

    let missing = repository
        .find_by_source_task(TaskId::new())
        .await
        .expect("lookup should succeed");
    assert!(missing.is_none());
    let unknown = repository
        .find_by_id(HistoryRecordId::new())
        .await
        .expect("lookup should succeed");
    assert!(unknown.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_by_id_frees_the_source_task_index(
    repository: Arc<InMemoryArchiveRepository>,
) {
    let source_task_id = TaskId::new();
    let record = record_for(source_task_id);
    repository
        .insert(&record)
        .await
        .expect("insert should succeed");

    let removed = repository
        .delete_by_id(record.id())
        .await
        .expect("delete should succeed");
    assert_eq!(removed, 1);
    assert!(!repository
        .exists_by_source_task(source_task_id)
        .await
        .expect("check should succeed"));

    let again = repository
        .delete_by_id(record.id())
        .await
        .expect("delete should succeed");
    assert_eq!(again, 0);
}
