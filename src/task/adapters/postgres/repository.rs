//! `PostgreSQL` repository implementation for live task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        GroupId, OwnerId, PersistedTaskData, PriorityCounts, StatusCounts, Task,
        TaskDescription, TaskId, TaskListFilter, TaskPriority, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, operation: &'static str, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| TaskRepositoryError::persistence(operation, err))?;
            f(&mut connection)
        })
        .await
        .map_err(|err| TaskRepositoryError::persistence(operation, err))?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_row(task);

        self.run_blocking("store", move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence("store", err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, owner: &OwnerId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let owner_key = owner.as_str().to_owned();
        self.run_blocking("find_by_id", move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::owner_id.eq(owner_key))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(|err| TaskRepositoryError::persistence("find_by_id", err))?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_owner(
        &self,
        owner: &OwnerId,
        filter: &TaskListFilter,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let owner_key = owner.as_str().to_owned();
        let scan = *filter;
        self.run_blocking("list_by_owner", move |connection| {
            let mut query = tasks::table
                .into_boxed()
                .filter(tasks::owner_id.eq(owner_key));
            if let Some(status) = scan.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(priority) = scan.priority {
                query = query.filter(tasks::priority.eq(priority.as_str()));
            }
            if let Some(group_id) = scan.group_id {
                query = query.filter(tasks::group_id.eq(group_id.into_inner()));
            }
            let rows = query
                .order((tasks::created_at.desc(), tasks::id.asc()))
                .load::<TaskRow>(connection)
                .map_err(|err| TaskRepositoryError::persistence("list_by_owner", err))?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task);
        self.run_blocking("update", move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&row)
                .execute(connection)
                .map_err(|err| TaskRepositoryError::persistence("update", err))?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, owner: &OwnerId, id: TaskId) -> TaskRepositoryResult<bool> {
        let owner_key = owner.as_str().to_owned();
        self.run_blocking("delete", move |connection| {
            let affected = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::owner_id.eq(owner_key)),
            )
            .execute(connection)
            .map_err(|err| TaskRepositoryError::persistence("delete", err))?;
            Ok(affected > 0)
        })
        .await
    }

    async fn count_by_status(&self, owner: &OwnerId) -> TaskRepositoryResult<StatusCounts> {
        let owner_key = owner.as_str().to_owned();
        self.run_blocking("count_by_status", move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner_key))
                .group_by(tasks::status)
                .select((tasks::status, diesel::dsl::count_star()))
                .load::<(String, i64)>(connection)
                .map_err(|err| TaskRepositoryError::persistence("count_by_status", err))?;
            let mut counts = StatusCounts::default();
            for (status, total) in rows {
                let status = TaskStatus::try_from(status.as_str())
                    .map_err(|err| TaskRepositoryError::persistence("count_by_status", err))?;
                let total = u64::try_from(total)
                    .map_err(|err| TaskRepositoryError::persistence("count_by_status", err))?;
                counts.add(status, total);
            }
            Ok(counts)
        })
        .await
    }

    async fn count_by_priority(&self, owner: &OwnerId) -> TaskRepositoryResult<PriorityCounts> {
        let owner_key = owner.as_str().to_owned();
        self.run_blocking("count_by_priority", move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner_key))
                .group_by(tasks::priority)
                .select((tasks::priority, diesel::dsl::count_star()))
                .load::<(String, i64)>(connection)
                .map_err(|err| TaskRepositoryError::persistence("count_by_priority", err))?;
            let mut counts = PriorityCounts::default();
            for (priority, total) in rows {
                let priority = TaskPriority::try_from(priority.as_str())
                    .map_err(|err| TaskRepositoryError::persistence("count_by_priority", err))?;
                let total = u64::try_from(total)
                    .map_err(|err| TaskRepositoryError::persistence("count_by_priority", err))?;
                counts.add(priority, total);
            }
            Ok(counts)
        })
        .await
    }
}

fn to_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner_id().as_str().to_owned(),
        group_id: task.group_id().map(GroupId::into_inner),
        title: task.title().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let map_err =
        |err: crate::task::domain::TaskDomainError| TaskRepositoryError::persistence("load", err);

    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        owner_id: OwnerId::new(row.owner_id).map_err(map_err)?,
        group_id: row.group_id.map(GroupId::from_uuid),
        title: TaskTitle::new(row.title).map_err(map_err)?,
        description: TaskDescription::new(row.description).map_err(map_err)?,
        status: TaskStatus::try_from(row.status.as_str())
            .map_err(|err| TaskRepositoryError::persistence("load", err))?,
        priority: TaskPriority::try_from(row.priority.as_str())
            .map_err(|err| TaskRepositoryError::persistence("load", err))?,
        created_at: row.created_at,
        updated_at: row.updated_at,
        completed_at: row.completed_at,
    };
    Ok(Task::from_persisted(data))
}
