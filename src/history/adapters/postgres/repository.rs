//! `PostgreSQL` repository implementation for completion history storage.
//!
//! Listing composes boxed Diesel queries from the enumerated filter and
//! ordering types; the aggregate queries (`GROUP BY` day, priority, and
//! label) go through `diesel::sql_query` with typed binds. No caller input
//! is ever interpolated into SQL text.

use super::{
    models::{
        CountRow, DailyStatRow, GroupStatRow, HistoryRow, NewHistoryRow, PriorityStatRow,
    },
    schema::history_records,
};
use crate::history::{
    domain::{
        DailyStat, GroupLabel, GroupStat, HistoryFilter, HistoryOrdering, HistoryRecord,
        HistoryRecordId, HistorySortKey, PageRequest, PersistedHistoryData, PriorityBreakdown,
        SortDirection, StatsWindow,
    },
    ports::{ArchiveRepository, ArchiveRepositoryError, ArchiveRepositoryResult},
};
use crate::task::domain::{OwnerId, TaskDescription, TaskId, TaskPriority, TaskTitle};
use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{BigInt, Date, Nullable, Text};

/// `PostgreSQL` connection pool type used by archive adapters.
pub type ArchivePgPool = Pool<ConnectionManager<PgConnection>>;

/// Ranks the priority varchar for semantic ordering (low < medium < high).
const PRIORITY_RANK_SQL: &str =
    "CASE priority WHEN 'low' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END";

/// `PostgreSQL`-backed archive repository.
#[derive(Debug, Clone)]
pub struct PostgresArchiveRepository {
    pool: ArchivePgPool,
}

impl PostgresArchiveRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ArchivePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(
        &self,
        operation: &'static str,
        f: F,
    ) -> ArchiveRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ArchiveRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| ArchiveRepositoryError::persistence(operation, err))?;
            f(&mut connection)
        })
        .await
        .map_err(|err| ArchiveRepositoryError::persistence(operation, err))?
    }
}

#[async_trait]
impl ArchiveRepository for PostgresArchiveRepository {
    async fn insert(&self, record: &HistoryRecord) -> ArchiveRepositoryResult<HistoryRecord> {
        let record_id = record.id();
        let source_task_id = record.source_task_id();
        let new_row = to_row(record);

        self.run_blocking("insert", move |connection| {
            // This pre-check improves semantic error reporting but is not
            // relied on for correctness: the unique index still enforces
            // integrity in the TOCTOU window between check and insert.
            let already_archived = source_task_exists(connection, source_task_id)
                .map_err(|err| ArchiveRepositoryError::persistence("insert", err))?;
            if already_archived {
                return Err(ArchiveRepositoryError::SourceTaskAlreadyArchived(
                    source_task_id,
                ));
            }

            diesel::insert_into(history_records::table)
                .values(&new_row)
                .returning(HistoryRow::as_returning())
                .get_result::<HistoryRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_source_task_unique_violation(info.as_ref()) =>
                    {
                        ArchiveRepositoryError::SourceTaskAlreadyArchived(source_task_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ArchiveRepositoryError::DuplicateRecord(record_id)
                    }
                    _ => ArchiveRepositoryError::persistence("insert", err),
                })
                .and_then(row_to_record)
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: HistoryRecordId,
    ) -> ArchiveRepositoryResult<Option<HistoryRecord>> {
        self.run_blocking("find_by_id", move |connection| {
            let row = history_records::table
                .filter(history_records::id.eq(id.into_inner()))
                .select(HistoryRow::as_select())
                .first::<HistoryRow>(connection)
                .optional()
                .map_err(|err| ArchiveRepositoryError::persistence("find_by_id", err))?;
            row.map(row_to_record).transpose()
        })
        .await
    }

    async fn find_by_source_task(
        &self,
        source_task_id: TaskId,
    ) -> ArchiveRepositoryResult<Option<HistoryRecord>> {
        self.run_blocking("find_by_source_task", move |connection| {
            let row = history_records::table
                .filter(history_records::source_task_id.eq(source_task_id.into_inner()))
                .select(HistoryRow::as_select())
                .first::<HistoryRow>(connection)
                .optional()
                .map_err(|err| {
                    ArchiveRepositoryError::persistence("find_by_source_task", err)
                })?;
            row.map(row_to_record).transpose()
        })
        .await
    }

    async fn exists_by_source_task(
        &self,
        source_task_id: TaskId,
    ) -> ArchiveRepositoryResult<bool> {
        self.run_blocking("exists_by_source_task", move |connection| {
            source_task_exists(connection, source_task_id)
                .map_err(|err| ArchiveRepositoryError::persistence("exists_by_source_task", err))
        })
        .await
    }

    async fn list_by_owner(
        &self,
        owner: &OwnerId,
        filter: &HistoryFilter,
        ordering: HistoryOrdering,
        page: PageRequest,
    ) -> ArchiveRepositoryResult<Vec<HistoryRecord>> {
        let owner_key = owner.as_str().to_owned();
        let scan = filter.clone();
        self.run_blocking("list_by_owner", move |connection| {
            let mut query = history_records::table
                .into_boxed()
                .filter(history_records::owner_id.eq(owner_key));
            if let Some(start) = scan.start_date {
                query = query.filter(history_records::completed_at.ge(day_start(start)));
            }
            if let Some(end) = scan.end_date {
                query = query.filter(history_records::completed_at.lt(day_end_exclusive(end)));
            }
            if let Some(priority) = scan.priority {
                query = query.filter(history_records::priority.eq(priority.as_str()));
            }
            if let Some(label) = scan.group_label {
                query = query.filter(history_records::group_label.eq(label.as_str().to_owned()));
            }
            query = match (ordering.key, ordering.direction) {
                (HistorySortKey::CompletedAt, SortDirection::Asc) => {
                    query.order(history_records::completed_at.asc())
                }
                (HistorySortKey::CompletedAt, SortDirection::Desc) => {
                    query.order(history_records::completed_at.desc())
                }
                (HistorySortKey::CreatedAt, SortDirection::Asc) => {
                    query.order(history_records::created_at.asc())
                }
                (HistorySortKey::CreatedAt, SortDirection::Desc) => {
                    query.order(history_records::created_at.desc())
                }
                (HistorySortKey::Title, SortDirection::Asc) => {
                    query.order(history_records::title.asc())
                }
                (HistorySortKey::Title, SortDirection::Desc) => {
                    query.order(history_records::title.desc())
                }
                (HistorySortKey::Priority, SortDirection::Asc) => query.order(
                    diesel::dsl::sql::<diesel::sql_types::Integer>(PRIORITY_RANK_SQL).asc(),
                ),
                (HistorySortKey::Priority, SortDirection::Desc) => query.order(
                    diesel::dsl::sql::<diesel::sql_types::Integer>(PRIORITY_RANK_SQL).desc(),
                ),
            };
            let rows = query
                .then_order_by(history_records::id.asc())
                .limit(i64::from(page.limit))
                .offset(i64::try_from(page.offset).unwrap_or(i64::MAX))
                .load::<HistoryRow>(connection)
                .map_err(|err| ArchiveRepositoryError::persistence("list_by_owner", err))?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }

    async fn count_by_owner(
        &self,
        owner: &OwnerId,
        filter: &HistoryFilter,
    ) -> ArchiveRepositoryResult<u64> {
        let owner_key = owner.as_str().to_owned();
        let scan = filter.clone();
        self.run_blocking("count_by_owner", move |connection| {
            let row = diesel::sql_query(concat!(
                "SELECT COUNT(*) AS total FROM history_records ",
                "WHERE owner_id = $1 ",
                "AND ($2 IS NULL OR (completed_at AT TIME ZONE 'UTC')::date >= $2) ",
                "AND ($3 IS NULL OR (completed_at AT TIME ZONE 'UTC')::date <= $3) ",
                "AND ($4 IS NULL OR priority = $4) ",
                "AND ($5 IS NULL OR group_label = $5)",
            ))
            .bind::<Text, _>(owner_key)
            .bind::<Nullable<Date>, _>(scan.start_date)
            .bind::<Nullable<Date>, _>(scan.end_date)
            .bind::<Nullable<Text>, _>(scan.priority.map(TaskPriority::as_str))
            .bind::<Nullable<Text>, _>(
                scan.group_label.as_ref().map(|label| label.as_str().to_owned()),
            )
            .get_result::<CountRow>(connection)
            .map_err(|err| ArchiveRepositoryError::persistence("count_by_owner", err))?;
            to_count("count_by_owner", row.total)
        })
        .await
    }

    async fn daily_stats(
        &self,
        owner: &OwnerId,
        window: &StatsWindow,
        limit: u32,
    ) -> ArchiveRepositoryResult<Vec<DailyStat>> {
        let owner_key = owner.as_str().to_owned();
        let span = *window;
        self.run_blocking("daily_stats", move |connection| {
            let rows = diesel::sql_query(concat!(
                "SELECT (completed_at AT TIME ZONE 'UTC')::date AS day, ",
                "COUNT(*) AS total, ",
                "COUNT(*) FILTER (WHERE priority = 'high') AS high_count, ",
                "COUNT(*) FILTER (WHERE priority = 'medium') AS medium_count, ",
                "COUNT(*) FILTER (WHERE priority = 'low') AS low_count ",
                "FROM history_records ",
                "WHERE owner_id = $1 ",
                "AND ($2 IS NULL OR (completed_at AT TIME ZONE 'UTC')::date >= $2) ",
                "AND ($3 IS NULL OR (completed_at AT TIME ZONE 'UTC')::date <= $3) ",
                "GROUP BY day ",
                "ORDER BY day DESC ",
                "LIMIT $4",
            ))
            .bind::<Text, _>(owner_key)
            .bind::<Nullable<Date>, _>(span.start_date)
            .bind::<Nullable<Date>, _>(span.end_date)
            .bind::<BigInt, _>(i64::from(limit))
            .load::<DailyStatRow>(connection)
            .map_err(|err| ArchiveRepositoryError::persistence("daily_stats", err))?;

            rows.into_iter()
                .map(|row| {
                    Ok(DailyStat {
                        date: row.day,
                        total: to_count("daily_stats", row.total)?,
                        high: to_count("daily_stats", row.high_count)?,
                        medium: to_count("daily_stats", row.medium_count)?,
                        low: to_count("daily_stats", row.low_count)?,
                    })
                })
                .collect()
        })
        .await
    }

    async fn priority_stats(
        &self,
        owner: &OwnerId,
        window: &StatsWindow,
    ) -> ArchiveRepositoryResult<PriorityBreakdown> {
        let owner_key = owner.as_str().to_owned();
        let span = *window;
        self.run_blocking("priority_stats", move |connection| {
            let rows = diesel::sql_query(concat!(
                "SELECT priority, COUNT(*) AS completed FROM history_records ",
                "WHERE owner_id = $1 ",
                "AND ($2 IS NULL OR (completed_at AT TIME ZONE 'UTC')::date >= $2) ",
                "AND ($3 IS NULL OR (completed_at AT TIME ZONE 'UTC')::date <= $3) ",
                "GROUP BY priority",
            ))
            .bind::<Text, _>(owner_key)
            .bind::<Nullable<Date>, _>(span.start_date)
            .bind::<Nullable<Date>, _>(span.end_date)
            .load::<PriorityStatRow>(connection)
            .map_err(|err| ArchiveRepositoryError::persistence("priority_stats", err))?;

            let mut breakdown = PriorityBreakdown::default();
            for row in rows {
                let priority = TaskPriority::try_from(row.priority.as_str())
                    .map_err(|err| ArchiveRepositoryError::persistence("priority_stats", err))?;
                breakdown.add(priority, to_count("priority_stats", row.completed)?);
            }
            Ok(breakdown)
        })
        .await
    }

    async fn group_stats(
        &self,
        owner: &OwnerId,
        window: &StatsWindow,
        limit: u32,
    ) -> ArchiveRepositoryResult<Vec<GroupStat>> {
        let owner_key = owner.as_str().to_owned();
        let span = *window;
        self.run_blocking("group_stats", move |connection| {
            // The sentinel literal matches GroupLabel::UNGROUPED; the
            // coalesced label is an output of the query, never an input.
            let rows = diesel::sql_query(concat!(
                "SELECT COALESCE(group_label, 'Ungrouped') AS label, ",
                "COUNT(*) AS completed FROM history_records ",
                "WHERE owner_id = $1 ",
                "AND ($2 IS NULL OR (completed_at AT TIME ZONE 'UTC')::date >= $2) ",
                "AND ($3 IS NULL OR (completed_at AT TIME ZONE 'UTC')::date <= $3) ",
                "GROUP BY COALESCE(group_label, 'Ungrouped') ",
                "ORDER BY completed DESC, label ASC ",
                "LIMIT $4",
            ))
            .bind::<Text, _>(owner_key)
            .bind::<Nullable<Date>, _>(span.start_date)
            .bind::<Nullable<Date>, _>(span.end_date)
            .bind::<BigInt, _>(i64::from(limit))
            .load::<GroupStatRow>(connection)
            .map_err(|err| ArchiveRepositoryError::persistence("group_stats", err))?;

            rows.into_iter()
                .map(|row| {
                    Ok(GroupStat {
                        label: GroupLabel::new(row.label)
                            .map_err(|err| ArchiveRepositoryError::persistence("group_stats", err))?,
                        completed: to_count("group_stats", row.completed)?,
                    })
                })
                .collect()
        })
        .await
    }

    async fn delete_by_id(&self, id: HistoryRecordId) -> ArchiveRepositoryResult<usize> {
        self.run_blocking("delete_by_id", move |connection| {
            diesel::delete(
                history_records::table.filter(history_records::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(|err| ArchiveRepositoryError::persistence("delete_by_id", err))
        })
        .await
    }

    async fn delete_by_owner(&self, owner: &OwnerId) -> ArchiveRepositoryResult<usize> {
        let owner_key = owner.as_str().to_owned();
        self.run_blocking("delete_by_owner", move |connection| {
            diesel::delete(
                history_records::table.filter(history_records::owner_id.eq(owner_key)),
            )
            .execute(connection)
            .map_err(|err| ArchiveRepositoryError::persistence("delete_by_owner", err))
        })
        .await
    }
}

/// Midnight UTC at the start of `date`.
fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Midnight UTC at the start of the day after `date`; inclusive end bounds
/// become exclusive timestamp bounds.
fn day_end_exclusive(date: NaiveDate) -> DateTime<Utc> {
    date.checked_add_days(Days::new(1))
        .map_or(DateTime::<Utc>::MAX_UTC, day_start)
}

fn source_task_exists(
    connection: &mut PgConnection,
    source_task_id: TaskId,
) -> Result<bool, DieselError> {
    diesel::select(diesel::dsl::exists(
        history_records::table
            .filter(history_records::source_task_id.eq(source_task_id.into_inner())),
    ))
    .get_result::<bool>(connection)
}

fn is_source_task_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_history_records_source_task_unique")
}

fn to_count(operation: &'static str, value: i64) -> ArchiveRepositoryResult<u64> {
    u64::try_from(value).map_err(|err| ArchiveRepositoryError::persistence(operation, err))
}

fn to_row(record: &HistoryRecord) -> NewHistoryRow {
    NewHistoryRow {
        id: record.id().into_inner(),
        owner_id: record.owner_id().as_str().to_owned(),
        source_task_id: record.source_task_id().into_inner(),
        title: record.title().as_str().to_owned(),
        description: record.description().as_str().to_owned(),
        group_label: record.group_label().map(|label| label.as_str().to_owned()),
        priority: record.priority().as_str().to_owned(),
        completed_at: record.completed_at(),
        created_at: record.created_at(),
    }
}

fn row_to_record(row: HistoryRow) -> ArchiveRepositoryResult<HistoryRecord> {
    let map_domain = |err: crate::task::domain::TaskDomainError| {
        ArchiveRepositoryError::persistence("load", err)
    };

    let data = PersistedHistoryData {
        id: HistoryRecordId::from_uuid(row.id),
        owner_id: OwnerId::new(row.owner_id).map_err(map_domain)?,
        source_task_id: TaskId::from_uuid(row.source_task_id),
        title: TaskTitle::new(row.title).map_err(map_domain)?,
        description: TaskDescription::new(row.description).map_err(map_domain)?,
        group_label: row
            .group_label
            .map(|label| {
                GroupLabel::new(label)
                    .map_err(|err| ArchiveRepositoryError::persistence("load", err))
            })
            .transpose()?,
        priority: TaskPriority::try_from(row.priority.as_str())
            .map_err(|err| ArchiveRepositoryError::persistence("load", err))?,
        completed_at: row.completed_at,
        created_at: row.created_at,
    };
    Ok(HistoryRecord::from_persisted(data))
}
