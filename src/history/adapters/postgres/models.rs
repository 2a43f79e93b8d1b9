//! Diesel row models for completion history persistence.

use super::schema::history_records;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for history records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = history_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HistoryRow {
    /// Record identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Owning user's identifier.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub owner_id: String,
    /// Identifier of the task the record was copied from.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub source_task_id: uuid::Uuid,
    /// Archived title.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub title: String,
    /// Archived description.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub description: String,
    /// Denormalized group label at archival time.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Varchar>)]
    pub group_label: Option<String>,
    /// Archived priority.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub priority: String,
    /// Completion moment of the source task.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub completed_at: DateTime<Utc>,
    /// Archival moment.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
}

/// Insert model for history records. No update model exists; records are
/// write-once.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = history_records)]
pub struct NewHistoryRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Owning user's identifier.
    pub owner_id: String,
    /// Identifier of the task the record was copied from.
    pub source_task_id: uuid::Uuid,
    /// Archived title.
    pub title: String,
    /// Archived description.
    pub description: String,
    /// Denormalized group label at archival time.
    pub group_label: Option<String>,
    /// Archived priority.
    pub priority: String,
    /// Completion moment of the source task.
    pub completed_at: DateTime<Utc>,
    /// Archival moment.
    pub created_at: DateTime<Utc>,
}

/// Aggregate row for the total count query.
#[derive(Debug, QueryableByName)]
pub struct CountRow {
    /// Matching record count.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub total: i64,
}

/// Aggregate row for per-day completion buckets.
#[derive(Debug, QueryableByName)]
pub struct DailyStatRow {
    /// UTC calendar date of the bucket.
    #[diesel(sql_type = diesel::sql_types::Date)]
    pub day: NaiveDate,
    /// Total completions on the day.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub total: i64,
    /// High-priority completions on the day.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub high_count: i64,
    /// Medium-priority completions on the day.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub medium_count: i64,
    /// Low-priority completions on the day.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub low_count: i64,
}

/// Aggregate row for per-priority completion counts.
#[derive(Debug, QueryableByName)]
pub struct PriorityStatRow {
    /// Priority bucket.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub priority: String,
    /// Completions in the bucket.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub completed: i64,
}

/// Aggregate row for per-group completion counts.
#[derive(Debug, QueryableByName)]
pub struct GroupStatRow {
    /// Group label, with ungrouped records already coalesced to the
    /// sentinel.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub label: String,
    /// Completions under the label.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub completed: i64,
}
