//! Unit tests for the free status transition graph.

use crate::task::domain::{
    OwnerId, Task, TaskDescription, TaskPriority, TaskStatus, TaskTitle,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn task(clock: DefaultClock) -> Task {
    Task::new(
        OwnerId::new("user-1").expect("valid owner"),
        TaskTitle::new("Transition test").expect("valid title"),
        TaskDescription::default(),
        TaskPriority::Medium,
        None,
        &clock,
    )
}

/// Every status is reachable from every other, including re-entry; the
/// graph is deliberately free, not a forward-only pipeline.
#[rstest]
fn every_transition_is_permitted_and_keeps_the_completion_invariant(
    clock: DefaultClock,
    task: Task,
) {
    for from in TaskStatus::ALL {
        for to in TaskStatus::ALL {
            let mut subject = task.clone();
            subject.set_status(from, &clock);
            subject.set_status(to, &clock);

            assert_eq!(subject.status(), to);
            assert_eq!(
                subject.is_done(),
                subject.completed_at().is_some(),
                "invariant broken for {from:?} -> {to:?}"
            );
        }
    }
}

#[rstest]
fn entering_done_stamps_completed_at(clock: DefaultClock, mut task: Task) {
    task.set_status(TaskStatus::Done, &clock);

    assert!(task.is_done());
    let completed_at = task.completed_at().expect("done task has completed_at");
    assert_eq!(completed_at, task.updated_at());
}

#[rstest]
fn leaving_done_clears_completed_at(clock: DefaultClock, mut task: Task) {
    task.set_status(TaskStatus::Done, &clock);
    task.set_status(TaskStatus::InProgress, &clock);

    assert!(task.is_in_progress());
    assert!(task.completed_at().is_none());
}

#[rstest]
fn reentering_done_restamps_completed_at(clock: DefaultClock, mut task: Task) {
    task.set_status(TaskStatus::Done, &clock);
    let first = task.completed_at().expect("done task has completed_at");

    task.set_status(TaskStatus::Done, &clock);
    let second = task.completed_at().expect("done task has completed_at");

    assert!(second >= first);
    assert_eq!(second, task.updated_at());
}

#[rstest]
fn transitions_between_non_done_statuses_leave_completion_unset(
    clock: DefaultClock,
    mut task: Task,
) {
    task.set_status(TaskStatus::InProgress, &clock);
    task.set_status(TaskStatus::Todo, &clock);

    assert!(task.is_todo());
    assert!(task.completed_at().is_none());
}

#[rstest]
fn status_predicates_track_the_current_status(clock: DefaultClock, mut task: Task) {
    task.set_status(TaskStatus::InProgress, &clock);
    assert!(task.is_in_progress());
    assert!(!task.is_todo());
    assert!(!task.is_done());

    task.set_status(TaskStatus::Done, &clock);
    assert!(task.is_done());
    assert!(!task.is_in_progress());
}
