//! Query configuration and count summaries for live task listings.

use super::{GroupId, TaskPriority, TaskStatus};
use serde::{Deserialize, Serialize};

/// Enumerated filter for live task scans.
///
/// Every field is optional; absent fields match everything. Filters compose
/// conjunctively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskListFilter {
    /// Restrict to tasks in this status.
    pub status: Option<TaskStatus>,
    /// Restrict to tasks at this priority.
    pub priority: Option<TaskPriority>,
    /// Restrict to tasks in this group.
    pub group_id: Option<GroupId>,
}

impl TaskListFilter {
    /// Restricts the filter to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the filter to one priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts the filter to one group.
    #[must_use]
    pub const fn with_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }
}

/// Zero-filled per-status task counts for one owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Tasks not yet started.
    pub todo: u64,
    /// Tasks underway.
    pub in_progress: u64,
    /// Tasks finished.
    pub done: u64,
}

impl StatusCounts {
    /// Adds `count` to the bucket for `status`.
    pub const fn add(&mut self, status: TaskStatus, count: u64) {
        match status {
            TaskStatus::Todo => self.todo += count,
            TaskStatus::InProgress => self.in_progress += count,
            TaskStatus::Done => self.done += count,
        }
    }

    /// Returns the total across all statuses.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.todo + self.in_progress + self.done
    }
}

/// Zero-filled per-priority task counts for one owner.
///
/// Field order is the reporting order: high, medium, low.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    /// High-priority tasks.
    pub high: u64,
    /// Medium-priority tasks.
    pub medium: u64,
    /// Low-priority tasks.
    pub low: u64,
}

impl PriorityCounts {
    /// Adds `count` to the bucket for `priority`.
    pub const fn add(&mut self, priority: TaskPriority, count: u64) {
        match priority {
            TaskPriority::High => self.high += count,
            TaskPriority::Medium => self.medium += count,
            TaskPriority::Low => self.low += count,
        }
    }

    /// Returns the total across all priorities.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.high + self.medium + self.low
    }
}
