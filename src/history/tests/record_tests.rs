//! Unit tests for history record construction and validation.

use crate::history::domain::{
    GroupLabel, HistoryRecordDraft, HistoryRecordId, HistoryValidationError,
};
use crate::task::domain::{
    OwnerId, Task, TaskDescription, TaskId, TaskPriority, TaskStatus, TaskTitle,
};
use chrono::{TimeZone, Utc};
use mockable::{Clock, DefaultClock};

fn timestamp() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

#[test]
fn build_generates_an_identifier_distinct_from_the_source_task() {
    let source_task_id = TaskId::new();
    let record = HistoryRecordDraft::new(
        "user-1",
        source_task_id,
        "Pay rent",
        TaskPriority::High,
        timestamp(),
        timestamp(),
    )
    .build()
    .expect("valid draft");

    assert_eq!(record.source_task_id(), source_task_id);
    assert_ne!(record.id().into_inner(), source_task_id.into_inner());
    assert_eq!(record.title().as_str(), "Pay rent");
    assert_eq!(record.priority(), TaskPriority::High);
    assert!(record.group_label().is_none());
}

#[test]
fn build_honours_a_caller_supplied_identifier() {
    let id = HistoryRecordId::new();
    let record = HistoryRecordDraft::new(
        "user-1",
        TaskId::new(),
        "Pay rent",
        TaskPriority::Low,
        timestamp(),
        timestamp(),
    )
    .with_id(id)
    .build()
    .expect("valid draft");

    assert_eq!(record.id(), id);
}

#[test]
fn build_carries_description_and_group_label() {
    let record = HistoryRecordDraft::new(
        "user-1",
        TaskId::new(),
        "Pay rent",
        TaskPriority::Medium,
        timestamp(),
        timestamp(),
    )
    .with_description("Transfer before the 15th")
    .with_group_label("Household")
    .build()
    .expect("valid draft");

    assert_eq!(record.description().as_str(), "Transfer before the 15th");
    assert_eq!(
        record.group_label().map(GroupLabel::as_str),
        Some("Household")
    );
}

#[test]
fn from_task_copies_the_archived_fields() {
    let clock = DefaultClock;
    let mut task = Task::new(
        OwnerId::new("user-1").expect("valid owner"),
        TaskTitle::new("Pay rent").expect("valid title"),
        TaskDescription::new("Wire the transfer").expect("valid description"),
        TaskPriority::High,
        None,
        &clock,
    );
    task.set_status(TaskStatus::Done, &clock);
    let completed_at = task.completed_at().expect("done task has completed_at");
    let label = GroupLabel::new("Household").expect("valid label");

    let record = HistoryRecordDraft::from_task(&task, Some(&label), completed_at, clock.utc())
        .build()
        .expect("valid draft");

    assert_eq!(record.owner_id(), task.owner_id());
    assert_eq!(record.source_task_id(), task.id());
    assert_eq!(record.title(), task.title());
    assert_eq!(record.description(), task.description());
    assert_eq!(record.priority(), task.priority());
    assert_eq!(record.completed_at(), completed_at);
    assert_eq!(record.group_label(), Some(&label));
}

#[test]
fn build_reports_every_violation_not_just_the_first() {
    let overlong = "x".repeat(TaskDescription::MAX_CHARS + 1);
    let result = HistoryRecordDraft::new(
        "  ",
        TaskId::new(),
        "",
        TaskPriority::Low,
        timestamp(),
        timestamp(),
    )
    .with_description(overlong)
    .with_group_label("   ")
    .build();

    let err = result.expect_err("draft should be rejected");
    assert!(err.is_multiple());
    let violations = err.violations();
    assert_eq!(violations.len(), 4);
    assert!(violations.contains(&HistoryValidationError::EmptyOwner));
    assert!(violations.contains(&HistoryValidationError::EmptyTitle));
    assert!(violations.contains(&HistoryValidationError::EmptyGroupLabel));
    assert!(violations
        .iter()
        .any(|violation| matches!(violation, HistoryValidationError::DescriptionTooLong { .. })));
}

#[test]
fn build_returns_a_single_violation_unwrapped() {
    let result = HistoryRecordDraft::new(
        "user-1",
        TaskId::new(),
        "",
        TaskPriority::Low,
        timestamp(),
        timestamp(),
    )
    .build();

    let err = result.expect_err("draft should be rejected");
    assert!(!err.is_multiple());
    assert_eq!(err, HistoryValidationError::EmptyTitle);
    assert_eq!(err.violations(), &[HistoryValidationError::EmptyTitle]);
}

#[test]
fn group_label_rejects_blank_and_overlong_input() {
    assert_eq!(
        GroupLabel::new(" "),
        Err(HistoryValidationError::EmptyGroupLabel)
    );
    let overlong = "x".repeat(GroupLabel::MAX_CHARS + 1);
    assert!(matches!(
        GroupLabel::new(overlong),
        Err(HistoryValidationError::GroupLabelTooLong { .. })
    ));
    assert_eq!(GroupLabel::ungrouped().as_str(), GroupLabel::UNGROUPED);
}
