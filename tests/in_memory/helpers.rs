//! Shared fixtures for the in-memory integration suite.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::DefaultClock;
use tasktrail::history::adapters::memory::InMemoryArchiveRepository;
use tasktrail::history::domain::HistoryRecordDraft;
use tasktrail::history::ports::ArchiveRepository;
use tasktrail::history::services::{AnalyticsService, ArchivalService};
use tasktrail::task::domain::{
    OwnerId, Task, TaskDescription, TaskId, TaskPriority, TaskTitle,
};

/// Archival service wired to a shared in-memory archive.
pub type TestArchivalService = ArchivalService<InMemoryArchiveRepository, DefaultClock>;

/// Analytics service wired to a shared in-memory archive.
pub type TestAnalyticsService = AnalyticsService<InMemoryArchiveRepository>;

/// Builds the archive repository and both services over it.
#[must_use]
pub fn archive_stack() -> (
    Arc<InMemoryArchiveRepository>,
    TestArchivalService,
    TestAnalyticsService,
) {
    let repository = Arc::new(InMemoryArchiveRepository::new());
    let archival = ArchivalService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    let analytics = AnalyticsService::new(Arc::clone(&repository));
    (repository, archival, analytics)
}

/// Builds a validated owner identifier.
#[must_use]
pub fn owner(raw: &str) -> OwnerId {
    OwnerId::new(raw).expect("valid owner")
}

/// Builds a new task for `owner_id`.
#[must_use]
pub fn task(owner_id: &OwnerId, title: &str, priority: TaskPriority) -> Task {
    Task::new(
        owner_id.clone(),
        TaskTitle::new(title).expect("valid title"),
        TaskDescription::default(),
        priority,
        None,
        &DefaultClock,
    )
}

/// A fixed UTC timestamp within May 2026.
#[must_use]
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Inserts a history record with a fixed completion moment directly into
/// the archive.
pub async fn seed_record(
    repository: &InMemoryArchiveRepository,
    owner_id: &str,
    title: &str,
    priority: TaskPriority,
    group: Option<&str>,
    completed_at: DateTime<Utc>,
) {
    let mut draft = HistoryRecordDraft::new(
        owner_id,
        TaskId::new(),
        title,
        priority,
        completed_at,
        completed_at,
    );
    if let Some(label) = group {
        draft = draft.with_group_label(label);
    }
    let record = draft.build().expect("valid draft");
    repository
        .insert(&record)
        .await
        .expect("insert should succeed");
}
