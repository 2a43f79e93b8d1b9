//! Unit tests for task domain value types and construction.

use crate::task::domain::{
    OwnerId, Task, TaskDescription, TaskDomainError, TaskPriority, TaskStatus, TaskTitle,
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("todo", TaskStatus::Todo)]
#[case("in_progress", TaskStatus::InProgress)]
#[case("done", TaskStatus::Done)]
#[case("  DONE  ", TaskStatus::Done)]
fn status_parses_known_tokens(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
#[case("")]
#[case("completed")]
#[case("in-progress")]
fn status_rejects_unknown_tokens(#[case] raw: &str) {
    assert!(TaskStatus::try_from(raw).is_err());
}

#[rstest]
#[case("low", TaskPriority::Low)]
#[case("medium", TaskPriority::Medium)]
#[case("high", TaskPriority::High)]
#[case(" High ", TaskPriority::High)]
fn priority_parses_known_tokens(#[case] raw: &str, #[case] expected: TaskPriority) {
    assert_eq!(TaskPriority::try_from(raw), Ok(expected));
}

#[rstest]
#[case("")]
#[case("urgent")]
fn priority_rejects_unknown_tokens(#[case] raw: &str) {
    assert!(TaskPriority::try_from(raw).is_err());
}

#[test]
fn priority_ranks_low_below_medium_below_high() {
    assert!(TaskPriority::Low < TaskPriority::Medium);
    assert!(TaskPriority::Medium < TaskPriority::High);
}

#[test]
fn title_rejects_blank_input() {
    assert_eq!(TaskTitle::new("   "), Err(TaskDomainError::EmptyTitle));
}

#[test]
fn title_rejects_overlong_input() {
    let raw = "x".repeat(TaskTitle::MAX_CHARS + 1);
    assert_eq!(
        TaskTitle::new(raw),
        Err(TaskDomainError::TitleTooLong {
            actual: TaskTitle::MAX_CHARS + 1,
            limit: TaskTitle::MAX_CHARS,
        })
    );
}

#[test]
fn title_accepts_boundary_length() {
    let raw = "x".repeat(TaskTitle::MAX_CHARS);
    assert!(TaskTitle::new(raw).is_ok());
}

#[test]
fn description_may_be_empty() {
    let description = TaskDescription::new("").expect("empty description is valid");
    assert!(description.is_empty());
}

#[test]
fn description_rejects_overlong_input() {
    let raw = "x".repeat(TaskDescription::MAX_CHARS + 1);
    assert!(matches!(
        TaskDescription::new(raw),
        Err(TaskDomainError::DescriptionTooLong { .. })
    ));
}

#[test]
fn owner_rejects_blank_input() {
    assert_eq!(OwnerId::new("  "), Err(TaskDomainError::EmptyOwner));
}

#[test]
fn new_task_starts_todo_without_completion() {
    let clock = DefaultClock;
    let task = Task::new(
        OwnerId::new("user-1").expect("valid owner"),
        TaskTitle::new("Write report").expect("valid title"),
        TaskDescription::default(),
        TaskPriority::Medium,
        None,
        &clock,
    );

    assert_eq!(task.status(), TaskStatus::Todo);
    assert!(task.is_todo());
    assert!(task.completed_at().is_none());
    assert_eq!(task.created_at(), task.updated_at());
}

#[test]
fn field_mutators_refresh_updated_at() {
    let clock = DefaultClock;
    let mut task = Task::new(
        OwnerId::new("user-1").expect("valid owner"),
        TaskTitle::new("Initial title").expect("valid title"),
        TaskDescription::default(),
        TaskPriority::Low,
        None,
        &clock,
    );
    let original_updated_at = task.updated_at();

    task.rename(TaskTitle::new("Renamed").expect("valid title"), &clock);
    task.set_description(
        TaskDescription::new("Details").expect("valid description"),
        &clock,
    );
    task.set_priority(TaskPriority::High, &clock);

    assert_eq!(task.title().as_str(), "Renamed");
    assert_eq!(task.description().as_str(), "Details");
    assert!(task.is_high_priority());
    assert!(task.updated_at() >= original_updated_at);
}
