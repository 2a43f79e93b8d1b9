//! Task aggregate root and its status/priority lifecycle.

use super::{GroupId, OwnerId, TaskDescription, TaskId, TaskPriority, TaskStatus, TaskTitle};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Invariant: `completed_at` is `Some` exactly when `status` is
/// [`TaskStatus::Done`]. Every mutation maintains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner_id: OwnerId,
    group_id: Option<GroupId>,
    title: TaskTitle,
    description: TaskDescription,
    status: TaskStatus,
    priority: TaskPriority,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner identifier.
    pub owner_id: OwnerId,
    /// Persisted group membership, if any.
    pub group_id: Option<GroupId>,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp, if the task was done.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task owned by `owner_id`, starting in
    /// [`TaskStatus::Todo`].
    #[must_use]
    pub fn new(
        owner_id: OwnerId,
        title: TaskTitle,
        description: TaskDescription,
        priority: TaskPriority,
        group_id: Option<GroupId>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            owner_id,
            group_id,
            title,
            description,
            status: TaskStatus::Todo,
            priority,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            group_id: data.group_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user's identifier.
    #[must_use]
    pub const fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns the group membership, if any.
    #[must_use]
    pub const fn group_id(&self) -> Option<GroupId> {
        self.group_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion timestamp, present exactly while the task is
    /// done.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Moves the task to `status`.
    ///
    /// Entering [`TaskStatus::Done`] stamps `completed_at` with the
    /// transition time (re-entering re-stamps it); any other target clears
    /// it. Every call refreshes `updated_at`.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        let now = clock.utc();
        self.status = status;
        self.completed_at = (status == TaskStatus::Done).then_some(now);
        self.updated_at = now;
    }

    /// Changes the task priority.
    pub fn set_priority(&mut self, priority: TaskPriority, clock: &impl Clock) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Replaces the task title.
    pub fn rename(&mut self, title: TaskTitle, clock: &impl Clock) {
        self.title = title;
        self.touch(clock);
    }

    /// Replaces the task description.
    pub fn set_description(&mut self, description: TaskDescription, clock: &impl Clock) {
        self.description = description;
        self.touch(clock);
    }

    /// Moves the task into a group, or out of any group with `None`.
    pub fn set_group(&mut self, group_id: Option<GroupId>, clock: &impl Clock) {
        self.group_id = group_id;
        self.touch(clock);
    }

    /// Returns `true` when the task is done.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.status, TaskStatus::Done)
    }

    /// Returns `true` when work on the task is underway.
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        matches!(self.status, TaskStatus::InProgress)
    }

    /// Returns `true` when work on the task has not started.
    #[must_use]
    pub const fn is_todo(&self) -> bool {
        matches!(self.status, TaskStatus::Todo)
    }

    /// Returns `true` when the task priority is high.
    #[must_use]
    pub const fn is_high_priority(&self) -> bool {
        matches!(self.priority, TaskPriority::High)
    }

    /// Returns `true` when the task priority is medium.
    #[must_use]
    pub const fn is_medium_priority(&self) -> bool {
        matches!(self.priority, TaskPriority::Medium)
    }

    /// Returns `true` when the task priority is low.
    #[must_use]
    pub const fn is_low_priority(&self) -> bool {
        matches!(self.priority, TaskPriority::Low)
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
