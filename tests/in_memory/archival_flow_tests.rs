//! Integration tests for the completion-to-archive flow.

use super::helpers::{archive_stack, owner, task};

use mockable::DefaultClock;
use std::sync::Arc;
use tasktrail::history::domain::GroupLabel;
use tasktrail::history::services::ArchivalError;
use tasktrail::task::adapters::memory::InMemoryTaskRepository;
use tasktrail::task::domain::{TaskPriority, TaskStatus};
use tasktrail::task::ports::TaskRepository;

/// The canonical lifecycle: a high-priority task is completed, archived
/// once, and a second archival attempt is rejected.
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_is_archived_exactly_once() {
    let clock = DefaultClock;
    let (_, archival, _) = archive_stack();
    let alice = owner("alice");
    let mut rent = task(&alice, "Pay rent", TaskPriority::High);

    rent.set_status(TaskStatus::Done, &clock);
    let completed_at = rent.completed_at().expect("done task has completed_at");

    let record = archival
        .archive(&rent, None)
        .await
        .expect("first archival should succeed");
    assert_eq!(record.priority(), TaskPriority::High);
    assert_eq!(record.completed_at(), completed_at);
    assert!(record.group_label().is_none());

    let second = archival.archive(&rent, None).await;
    assert!(matches!(
        second,
        Err(ArchivalError::AlreadyArchived(id)) if id == rent.id()
    ));
}

/// Deleting the source task does not disturb its history record; the
/// archival copy is one-way and one-time.
#[tokio::test(flavor = "multi_thread")]
async fn record_survives_source_task_deletion() -> eyre::Result<()> {
    let clock = DefaultClock;
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let (_, archival, analytics) = archive_stack();
    let alice = owner("alice");
    let mut errand = task(&alice, "Return library books", TaskPriority::Low);

    tasks.store(&errand).await?;
    errand.set_status(TaskStatus::Done, &clock);
    tasks.update(&errand).await?;
    archival.archive(&errand, None).await?;

    let removed = tasks.delete(&alice, errand.id()).await?;
    eyre::ensure!(removed, "stored task should be deletable");

    eyre::ensure!(
        archival.is_archived(errand.id()).await?,
        "record should outlive its source task"
    );
    let recent = analytics.get_recent_completed(&alice, 10).await?;
    eyre::ensure!(
        recent.first().map(|record| record.title().as_str()) == Some("Return library books"),
        "archived record should still be listed"
    );
    Ok(())
}

/// Purging the archival trace frees the task for a fresh manual archival.
#[tokio::test(flavor = "multi_thread")]
async fn trace_removal_allows_a_corrective_rearchival() {
    let clock = DefaultClock;
    let (_, archival, _) = archive_stack();
    let alice = owner("alice");
    let mut chore = task(&alice, "Mow the lawn", TaskPriority::Medium);
    chore.set_status(TaskStatus::Done, &clock);

    archival
        .archive(&chore, None)
        .await
        .expect("archival should succeed");
    let removed = archival
        .delete_archive_for_task(chore.id(), &alice)
        .await
        .expect("deletion should succeed");
    assert!(removed);

    let label = GroupLabel::new("Garden").expect("valid label");
    let replacement = archival
        .archive(&chore, Some(&label))
        .await
        .expect("re-archival should succeed");
    assert_eq!(replacement.group_label(), Some(&label));
}

/// The group label is denormalized at archival time and carried verbatim.
#[tokio::test(flavor = "multi_thread")]
async fn group_label_is_copied_onto_the_record() {
    let clock = DefaultClock;
    let (_, archival, _) = archive_stack();
    let alice = owner("alice");
    let mut chore = task(&alice, "Fix the gate", TaskPriority::Medium);
    chore.set_status(TaskStatus::Done, &clock);

    let label = GroupLabel::new("Garden").expect("valid label");
    let record = archival
        .archive(&chore, Some(&label))
        .await
        .expect("archival should succeed");

    assert_eq!(record.group_label().map(GroupLabel::as_str), Some("Garden"));
    assert_eq!(record.owner_id(), &alice);
}
