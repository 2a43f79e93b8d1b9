//! Statistical summary value types derived from the archive.

use super::GroupLabel;
use crate::task::domain::TaskPriority;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Zero-filled per-priority completion counts.
///
/// Field order is the reporting and serialization order: high, medium, low.
/// All three keys are always present, zero-filled when no record matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    /// Completions archived at high priority.
    pub high: u64,
    /// Completions archived at medium priority.
    pub medium: u64,
    /// Completions archived at low priority.
    pub low: u64,
}

impl PriorityBreakdown {
    /// Adds `count` to the bucket for `priority`.
    pub const fn add(&mut self, priority: TaskPriority, count: u64) {
        match priority {
            TaskPriority::High => self.high += count,
            TaskPriority::Medium => self.medium += count,
            TaskPriority::Low => self.low += count,
        }
    }

    /// Returns the count for one priority.
    #[must_use]
    pub const fn get(&self, priority: TaskPriority) -> u64 {
        match priority {
            TaskPriority::High => self.high,
            TaskPriority::Medium => self.medium,
            TaskPriority::Low => self.low,
        }
    }

    /// Returns the total across all priorities.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.high + self.medium + self.low
    }
}

/// Completion counts for one UTC calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStat {
    /// The UTC calendar date of the bucketed completions.
    pub date: NaiveDate,
    /// Total completions on that date.
    pub total: u64,
    /// High-priority completions on that date.
    pub high: u64,
    /// Medium-priority completions on that date.
    pub medium: u64,
    /// Low-priority completions on that date.
    pub low: u64,
}

impl DailyStat {
    /// Creates an empty bucket for `date`.
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total: 0,
            high: 0,
            medium: 0,
            low: 0,
        }
    }

    /// Counts one completion archived at `priority`.
    pub const fn record(&mut self, priority: TaskPriority) {
        self.total += 1;
        match priority {
            TaskPriority::High => self.high += 1,
            TaskPriority::Medium => self.medium += 1,
            TaskPriority::Low => self.low += 1,
        }
    }

    /// Returns the per-priority counts as a breakdown.
    #[must_use]
    pub const fn breakdown(&self) -> PriorityBreakdown {
        PriorityBreakdown {
            high: self.high,
            medium: self.medium,
            low: self.low,
        }
    }
}

/// Completion count for one group label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStat {
    /// The group label, [`GroupLabel::UNGROUPED`] for ungrouped records.
    pub label: GroupLabel,
    /// Completions archived under that label.
    pub completed: u64,
}
