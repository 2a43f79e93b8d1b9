//! Service layer for paginated history listings and completion statistics.

use crate::history::{
    domain::{
        GroupLabel, GroupStat, HistoryFilter, HistoryOrdering, HistoryRecord, PageRequest,
        PriorityBreakdown, StatsWindow,
    },
    ports::{ArchiveRepository, ArchiveRepositoryError},
};
use crate::task::domain::{OwnerId, TaskPriority};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Largest page size served by [`AnalyticsService::get_history`].
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when the caller supplies none.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest number of day buckets served by
/// [`AnalyticsService::get_daily_stats`].
pub const MAX_DAILY_STAT_DAYS: u32 = 365;

/// Day-bucket count used when the caller supplies none.
pub const DEFAULT_DAILY_STAT_DAYS: u32 = 30;

/// Largest number of group buckets served by
/// [`AnalyticsService::get_group_stats`].
pub const MAX_GROUP_STATS: u32 = 100;

/// Group-bucket count used when the caller supplies none.
pub const DEFAULT_GROUP_STATS: u32 = 10;

/// Service-level errors for analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ArchiveRepositoryError),
}

/// Result type for analytics service operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Raw listing options as the transport adapter hands them over.
///
/// Page, limit, and the sort tokens arrive as loosely-typed client input
/// and are coerced here before they reach the store: page is floored at 1,
/// limit is clamped to `1..=`[`MAX_PAGE_SIZE`], and unrecognized sort
/// tokens silently fall back to `completed_at` descending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Requested page number, 1-based.
    pub page: Option<u32>,
    /// Requested page size.
    pub limit: Option<u32>,
    /// Earliest UTC completion date to include.
    pub start_date: Option<NaiveDate>,
    /// Latest UTC completion date to include.
    pub end_date: Option<NaiveDate>,
    /// Restrict to records archived at this priority.
    pub priority: Option<TaskPriority>,
    /// Restrict to records archived under this group label.
    pub group_label: Option<GroupLabel>,
    /// Raw sort column token.
    pub sort_by: Option<String>,
    /// Raw sort direction token.
    pub sort_order: Option<String>,
}

impl HistoryQuery {
    fn filter(&self) -> HistoryFilter {
        HistoryFilter {
            start_date: self.start_date,
            end_date: self.end_date,
            priority: self.priority,
            group_label: self.group_label.clone(),
        }
    }
}

/// Raw statistics options as the transport adapter hands them over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsQuery {
    /// Earliest UTC completion date to include.
    pub start_date: Option<NaiveDate>,
    /// Latest UTC completion date to include.
    pub end_date: Option<NaiveDate>,
    /// Requested bucket cap.
    pub limit: Option<u32>,
}

impl StatsQuery {
    const fn window(&self) -> StatsWindow {
        StatsWindow {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// One page of history records with its pagination envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryPage {
    /// The records on this page.
    pub entries: Vec<HistoryRecord>,
    /// 1-based page number served.
    pub page: u32,
    /// Page size served.
    pub limit: u32,
    /// Total matching records across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_prev: bool,
}

/// One day of completions, reshaped for the transport adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    /// The UTC calendar date.
    pub date: NaiveDate,
    /// Total completions on that date.
    pub total_completed: u64,
    /// Per-priority completions on that date.
    pub by_priority: PriorityBreakdown,
}

/// Read-only composition of archive queries into listings and summaries.
#[derive(Clone)]
pub struct AnalyticsService<R>
where
    R: ArchiveRepository,
{
    repository: Arc<R>,
}

impl<R> AnalyticsService<R>
where
    R: ArchiveRepository,
{
    /// Creates a new analytics service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Serves one page of the owner's history with its pagination envelope.
    ///
    /// The listing and the total count are independent reads and are issued
    /// concurrently; a record archived between the two only skews a page
    /// display, so the staleness window is acceptable.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Repository`] when either read fails.
    pub async fn get_history(
        &self,
        owner: &OwnerId,
        query: &HistoryQuery,
    ) -> AnalyticsResult<HistoryPage> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = u64::from(page - 1) * u64::from(limit);
        let filter = query.filter();
        let ordering =
            HistoryOrdering::from_raw(query.sort_by.as_deref(), query.sort_order.as_deref());

        let (entries, total) = tokio::join!(
            self.repository
                .list_by_owner(owner, &filter, ordering, PageRequest::new(limit, offset)),
            self.repository.count_by_owner(owner, &filter),
        );
        let entries = entries?;
        let total = total?;

        let total_pages = total.div_ceil(u64::from(limit));
        Ok(HistoryPage {
            entries,
            page,
            limit,
            total,
            total_pages,
            has_next: u64::from(page) < total_pages,
            has_prev: page > 1,
        })
    }

    /// Serves the owner's most recent daily completion summaries.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Repository`] when the aggregate read
    /// fails.
    pub async fn get_daily_stats(
        &self,
        owner: &OwnerId,
        query: &StatsQuery,
    ) -> AnalyticsResult<Vec<DailySummary>> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_DAILY_STAT_DAYS)
            .clamp(1, MAX_DAILY_STAT_DAYS);
        let stats = self
            .repository
            .daily_stats(owner, &query.window(), limit)
            .await?;
        Ok(stats
            .into_iter()
            .map(|stat| DailySummary {
                date: stat.date,
                total_completed: stat.total,
                by_priority: stat.breakdown(),
            })
            .collect())
    }

    /// Serves the owner's per-priority completion counts, zero-filled.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Repository`] when the aggregate read
    /// fails.
    pub async fn get_priority_stats(
        &self,
        owner: &OwnerId,
        window: &StatsWindow,
    ) -> AnalyticsResult<PriorityBreakdown> {
        Ok(self.repository.priority_stats(owner, window).await?)
    }

    /// Serves the owner's busiest group labels.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Repository`] when the aggregate read
    /// fails.
    pub async fn get_group_stats(
        &self,
        owner: &OwnerId,
        query: &StatsQuery,
    ) -> AnalyticsResult<Vec<GroupStat>> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_GROUP_STATS)
            .clamp(1, MAX_GROUP_STATS);
        Ok(self
            .repository
            .group_stats(owner, &query.window(), limit)
            .await?)
    }

    /// Serves the owner's most recently completed records, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Repository`] when the listing fails.
    pub async fn get_recent_completed(
        &self,
        owner: &OwnerId,
        limit: u32,
    ) -> AnalyticsResult<Vec<HistoryRecord>> {
        let capped = limit.clamp(1, MAX_PAGE_SIZE);
        Ok(self
            .repository
            .list_by_owner(
                owner,
                &HistoryFilter::default(),
                HistoryOrdering::default(),
                PageRequest::new(capped, 0),
            )
            .await?)
    }
}
