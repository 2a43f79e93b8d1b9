//! Filter, sort, and pagination configuration for archive scans.
//!
//! Queries are composed from these enumerated types only; no fragment of
//! caller input ever reaches a query string. Calendar-date bounds are
//! interpreted against the UTC date of `completed_at` and are inclusive on
//! both ends.

use super::{GroupLabel, HistoryRecord};
use crate::task::domain::TaskPriority;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Enumerated filter for archive scans.
///
/// Every field is optional; absent fields match everything. Filters compose
/// conjunctively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Earliest UTC completion date to include.
    pub start_date: Option<chrono::NaiveDate>,
    /// Latest UTC completion date to include.
    pub end_date: Option<chrono::NaiveDate>,
    /// Restrict to records archived at this priority.
    pub priority: Option<TaskPriority>,
    /// Restrict to records archived under this group label.
    pub group_label: Option<GroupLabel>,
}

impl HistoryFilter {
    /// Restricts the filter to completions on or after `date`.
    #[must_use]
    pub const fn with_start_date(mut self, date: chrono::NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Restricts the filter to completions on or before `date`.
    #[must_use]
    pub const fn with_end_date(mut self, date: chrono::NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Restricts the filter to one priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts the filter to one group label.
    #[must_use]
    pub fn with_group_label(mut self, label: GroupLabel) -> Self {
        self.group_label = Some(label);
        self
    }

    /// Returns `true` when `record` matches every supplied filter field.
    #[must_use]
    pub fn matches(&self, record: &HistoryRecord) -> bool {
        let day = record.completed_at().date_naive();
        self.start_date.is_none_or(|start| day >= start)
            && self.end_date.is_none_or(|end| day <= end)
            && self
                .priority
                .is_none_or(|priority| record.priority() == priority)
            && self
                .group_label
                .as_ref()
                .is_none_or(|label| record.group_label() == Some(label))
    }

    /// Returns the date-only part of this filter.
    #[must_use]
    pub fn window(&self) -> StatsWindow {
        StatsWindow {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Inclusive UTC calendar-date window for statistics queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsWindow {
    /// Earliest UTC completion date to include.
    pub start_date: Option<chrono::NaiveDate>,
    /// Latest UTC completion date to include.
    pub end_date: Option<chrono::NaiveDate>,
}

impl StatsWindow {
    /// Restricts the window to completions on or after `date`.
    #[must_use]
    pub const fn with_start_date(mut self, date: chrono::NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Restricts the window to completions on or before `date`.
    #[must_use]
    pub const fn with_end_date(mut self, date: chrono::NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Returns `true` when `record` completed within the window.
    #[must_use]
    pub fn contains(&self, record: &HistoryRecord) -> bool {
        let day = record.completed_at().date_naive();
        self.start_date.is_none_or(|start| day >= start)
            && self.end_date.is_none_or(|end| day <= end)
    }
}

/// Sortable columns for archive listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistorySortKey {
    /// Sort by the source task's completion moment.
    CompletedAt,
    /// Sort by the archival moment.
    CreatedAt,
    /// Sort lexicographically by title.
    Title,
    /// Sort by priority rank (low < medium < high).
    Priority,
}

impl HistorySortKey {
    /// Parses a raw sort token, returning `None` for unrecognized input.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "completed_at" => Some(Self::CompletedAt),
            "created_at" => Some(Self::CreatedAt),
            "title" => Some(Self::Title),
            "priority" => Some(Self::Priority),
            _ => None,
        }
    }
}

/// Sort direction for archive listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Parses a raw direction token, returning `None` for unrecognized
    /// input.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Resolved ordering for archive listings.
///
/// The default, and the fallback for malformed client input, is
/// `completed_at` descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryOrdering {
    /// Column to sort by.
    pub key: HistorySortKey,
    /// Direction to sort in.
    pub direction: SortDirection,
}

impl Default for HistoryOrdering {
    fn default() -> Self {
        Self {
            key: HistorySortKey::CompletedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl HistoryOrdering {
    /// Creates an ordering from a key and direction.
    #[must_use]
    pub const fn new(key: HistorySortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Resolves raw client sort tokens.
    ///
    /// Unrecognized or absent tokens silently fall back to the default
    /// (`completed_at` descending), each token independently. Malformed
    /// sort input is treated as benign, not as an error.
    #[must_use]
    pub fn from_raw(key: Option<&str>, direction: Option<&str>) -> Self {
        Self {
            key: key
                .and_then(HistorySortKey::parse)
                .unwrap_or(HistorySortKey::CompletedAt),
            direction: direction
                .and_then(SortDirection::parse)
                .unwrap_or(SortDirection::Desc),
        }
    }

    /// Compares two records under this ordering.
    ///
    /// Ties are left `Equal`; stores append their own deterministic
    /// tie-break on the record identifier.
    #[must_use]
    pub fn compare(&self, a: &HistoryRecord, b: &HistoryRecord) -> Ordering {
        let forward = match self.key {
            HistorySortKey::CompletedAt => a.completed_at().cmp(&b.completed_at()),
            HistorySortKey::CreatedAt => a.created_at().cmp(&b.created_at()),
            HistorySortKey::Title => a.title().cmp(b.title()),
            HistorySortKey::Priority => a.priority().cmp(&b.priority()),
        };
        match self.direction {
            SortDirection::Asc => forward,
            SortDirection::Desc => forward.reverse(),
        }
    }
}

/// Pagination bounds for archive listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of records to return.
    pub limit: u32,
    /// Number of matching records to skip.
    pub offset: u64,
}

impl PageRequest {
    /// Creates a page request.
    #[must_use]
    pub const fn new(limit: u32, offset: u64) -> Self {
        Self { limit, offset }
    }
}
