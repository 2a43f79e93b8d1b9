//! Application services for archival and analytics.

mod analytics;
mod archival;

pub use analytics::{
    AnalyticsError, AnalyticsResult, AnalyticsService, DailySummary, HistoryPage, HistoryQuery,
    StatsQuery, DEFAULT_DAILY_STAT_DAYS, DEFAULT_GROUP_STATS, DEFAULT_PAGE_SIZE,
    MAX_DAILY_STAT_DAYS, MAX_GROUP_STATS, MAX_PAGE_SIZE,
};
pub use archival::{ArchivalError, ArchivalResult, ArchivalService};
