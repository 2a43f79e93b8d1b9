//! In-memory repository for live task storage.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{OwnerId, PriorityCounts, StatusCounts, Task, TaskId, TaskListFilter},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
        operation: &'static str,
    ) -> TaskRepositoryResult<RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(operation, std::io::Error::other(err.to_string()))
        })
    }

    fn write(
        &self,
        operation: &'static str,
    ) -> TaskRepositoryResult<RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(operation, std::io::Error::other(err.to_string()))
        })
    }
}

/// Returns `true` when `task` belongs to `owner` and matches every supplied
/// filter field.
fn matches_filter(task: &Task, owner: &OwnerId, filter: &TaskListFilter) -> bool {
    task.owner_id() == owner
        && filter.status.is_none_or(|status| task.status() == status)
        && filter
            .priority
            .is_none_or(|priority| task.priority() == priority)
        && filter
            .group_id
            .is_none_or(|group| task.group_id() == Some(group))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write("store")?;
        if state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, owner: &OwnerId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read("find_by_id")?;
        Ok(state
            .get(&id)
            .filter(|task| task.owner_id() == owner)
            .cloned())
    }

    async fn list_by_owner(
        &self,
        owner: &OwnerId,
        filter: &TaskListFilter,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read("list_by_owner")?;
        let mut tasks: Vec<Task> = state
            .values()
            .filter(|task| matches_filter(task, owner, filter))
            .cloned()
            .collect();
        // Newest first, task ID as the deterministic tie-break.
        tasks.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(tasks)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write("update")?;
        if !state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, owner: &OwnerId, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write("delete")?;
        let owned = state
            .get(&id)
            .is_some_and(|task| task.owner_id() == owner);
        if owned {
            state.remove(&id);
        }
        Ok(owned)
    }

    async fn count_by_status(&self, owner: &OwnerId) -> TaskRepositoryResult<StatusCounts> {
        let state = self.read("count_by_status")?;
        let mut counts = StatusCounts::default();
        for task in state.values().filter(|task| task.owner_id() == owner) {
            counts.add(task.status(), 1);
        }
        Ok(counts)
    }

    async fn count_by_priority(&self, owner: &OwnerId) -> TaskRepositoryResult<PriorityCounts> {
        let state = self.read("count_by_priority")?;
        let mut counts = PriorityCounts::default();
        for task in state.values().filter(|task| task.owner_id() == owner) {
            counts.add(task.priority(), 1);
        }
        Ok(counts)
    }
}
