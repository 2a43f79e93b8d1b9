//! Domain model for the completion history.
//!
//! The history domain models immutable archived copies of completed tasks,
//! the enumerated filter/sort configuration archive scans are composed
//! from, and the statistical summaries derived from the archive. All
//! calendar bucketing is done against the UTC date of `completed_at`.

mod error;
mod filter;
mod ids;
mod record;
mod stats;

pub use error::HistoryValidationError;
pub use filter::{
    HistoryFilter, HistoryOrdering, HistorySortKey, PageRequest, SortDirection, StatsWindow,
};
pub use ids::{GroupLabel, HistoryRecordId};
pub use record::{HistoryRecord, HistoryRecordDraft, PersistedHistoryData};
pub use stats::{DailyStat, GroupStat, PriorityBreakdown};
