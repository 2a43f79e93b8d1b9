//! In-memory repository for the completion history.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::history::{
    domain::{
        DailyStat, GroupLabel, GroupStat, HistoryFilter, HistoryOrdering, HistoryRecord,
        HistoryRecordId, PageRequest, PriorityBreakdown, StatsWindow,
    },
    ports::{ArchiveRepository, ArchiveRepositoryError, ArchiveRepositoryResult},
};
use crate::task::domain::{OwnerId, TaskId};

/// Thread-safe in-memory archive repository.
///
/// The source-task index doubles as the storage-layer uniqueness guarantee:
/// insertion checks and updates it under the same write lock, so two
/// concurrent archival attempts for one task cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryArchiveRepository {
    state: Arc<RwLock<InMemoryArchiveState>>,
}

#[derive(Debug, Default)]
struct InMemoryArchiveState {
    records: HashMap<HistoryRecordId, HistoryRecord>,
    source_index: HashMap<TaskId, HistoryRecordId>,
}

impl InMemoryArchiveRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
        operation: &'static str,
    ) -> ArchiveRepositoryResult<RwLockReadGuard<'_, InMemoryArchiveState>> {
        self.state.read().map_err(|err| {
            ArchiveRepositoryError::persistence(operation, std::io::Error::other(err.to_string()))
        })
    }

    fn write(
        &self,
        operation: &'static str,
    ) -> ArchiveRepositoryResult<RwLockWriteGuard<'_, InMemoryArchiveState>> {
        self.state.write().map_err(|err| {
            ArchiveRepositoryError::persistence(operation, std::io::Error::other(err.to_string()))
        })
    }
}

/// Clamps a `u64` skip count to an indexable size.
fn to_skip(offset: u64) -> usize {
    usize::try_from(offset).unwrap_or(usize::MAX)
}

/// Widens a `u32` cap to an indexable size.
fn to_cap(limit: u32) -> usize {
    usize::try_from(limit).unwrap_or(usize::MAX)
}

#[async_trait]
impl ArchiveRepository for InMemoryArchiveRepository {
    async fn insert(&self, record: &HistoryRecord) -> ArchiveRepositoryResult<HistoryRecord> {
        let mut state = self.write("insert")?;
        if state.records.contains_key(&record.id()) {
            return Err(ArchiveRepositoryError::DuplicateRecord(record.id()));
        }
        if state.source_index.contains_key(&record.source_task_id()) {
            return Err(ArchiveRepositoryError::SourceTaskAlreadyArchived(
                record.source_task_id(),
            ));
        }
        state
            .source_index
            .insert(record.source_task_id(), record.id());
        state.records.insert(record.id(), record.clone());
        Ok(record.clone())
    }

    async fn find_by_id(
        &self,
        id: HistoryRecordId,
    ) -> ArchiveRepositoryResult<Option<HistoryRecord>> {
        let state = self.read("find_by_id")?;
        Ok(state.records.get(&id).cloned())
    }

    async fn find_by_source_task(
        &self,
        source_task_id: TaskId,
    ) -> ArchiveRepositoryResult<Option<HistoryRecord>> {
        let state = self.read("find_by_source_task")?;
        Ok(state
            .source_index
            .get(&source_task_id)
            .and_then(|id| state.records.get(id))
            .cloned())
    }

    async fn exists_by_source_task(
        &self,
        source_task_id: TaskId,
    ) -> ArchiveRepositoryResult<bool> {
        let state = self.read("exists_by_source_task")?;
        Ok(state.source_index.contains_key(&source_task_id))
    }

    async fn list_by_owner(
        &self,
        owner: &OwnerId,
        filter: &HistoryFilter,
        ordering: HistoryOrdering,
        page: PageRequest,
    ) -> ArchiveRepositoryResult<Vec<HistoryRecord>> {
        let state = self.read("list_by_owner")?;
        let mut records: Vec<HistoryRecord> = state
            .records
            .values()
            .filter(|record| record.owner_id() == owner && filter.matches(record))
            .cloned()
            .collect();
        // Record ID as the deterministic tie-break, matching the SQL store.
        records.sort_by(|a, b| ordering.compare(a, b).then_with(|| a.id().cmp(&b.id())));
        Ok(records
            .into_iter()
            .skip(to_skip(page.offset))
            .take(to_cap(page.limit))
            .collect())
    }

    async fn count_by_owner(
        &self,
        owner: &OwnerId,
        filter: &HistoryFilter,
    ) -> ArchiveRepositoryResult<u64> {
        let state = self.read("count_by_owner")?;
        let count = state
            .records
            .values()
            .filter(|record| record.owner_id() == owner && filter.matches(record))
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn daily_stats(
        &self,
        owner: &OwnerId,
        window: &StatsWindow,
        limit: u32,
    ) -> ArchiveRepositoryResult<Vec<DailyStat>> {
        let state = self.read("daily_stats")?;
        let mut buckets: BTreeMap<NaiveDate, DailyStat> = BTreeMap::new();
        for record in state
            .records
            .values()
            .filter(|record| record.owner_id() == owner && window.contains(record))
        {
            let day = record.completed_at().date_naive();
            buckets
                .entry(day)
                .or_insert_with(|| DailyStat::empty(day))
                .record(record.priority());
        }
        Ok(buckets
            .into_values()
            .rev()
            .take(to_cap(limit))
            .collect())
    }

    async fn priority_stats(
        &self,
        owner: &OwnerId,
        window: &StatsWindow,
    ) -> ArchiveRepositoryResult<PriorityBreakdown> {
        let state = self.read("priority_stats")?;
        let mut breakdown = PriorityBreakdown::default();
        for record in state
            .records
            .values()
            .filter(|record| record.owner_id() == owner && window.contains(record))
        {
            breakdown.add(record.priority(), 1);
        }
        Ok(breakdown)
    }

    async fn group_stats(
        &self,
        owner: &OwnerId,
        window: &StatsWindow,
        limit: u32,
    ) -> ArchiveRepositoryResult<Vec<GroupStat>> {
        let state = self.read("group_stats")?;
        let mut buckets: HashMap<GroupLabel, u64> = HashMap::new();
        for record in state
            .records
            .values()
            .filter(|record| record.owner_id() == owner && window.contains(record))
        {
            let label = record
                .group_label()
                .cloned()
                .unwrap_or_else(GroupLabel::ungrouped);
            *buckets.entry(label).or_insert(0) += 1;
        }
        let mut stats: Vec<GroupStat> = buckets
            .into_iter()
            .map(|(label, completed)| GroupStat { label, completed })
            .collect();
        // Busiest groups first, label as the deterministic tie-break.
        stats.sort_by(|a, b| {
            b.completed
                .cmp(&a.completed)
                .then_with(|| a.label.cmp(&b.label))
        });
        stats.truncate(to_cap(limit));
        Ok(stats)
    }

    async fn delete_by_id(&self, id: HistoryRecordId) -> ArchiveRepositoryResult<usize> {
        let mut state = self.write("delete_by_id")?;
        match state.records.remove(&id) {
            Some(record) => {
                state.source_index.remove(&record.source_task_id());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_owner(&self, owner: &OwnerId) -> ArchiveRepositoryResult<usize> {
        let mut state = self.write("delete_by_owner")?;
        let doomed: Vec<HistoryRecordId> = state
            .records
            .values()
            .filter(|record| record.owner_id() == owner)
            .map(HistoryRecord::id)
            .collect();
        for id in &doomed {
            if let Some(record) = state.records.remove(id) {
                state.source_index.remove(&record.source_task_id());
            }
        }
        Ok(doomed.len())
    }
}
