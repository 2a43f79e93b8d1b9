//! Immutable archived copy of a completed task.

use super::{GroupLabel, HistoryRecordId, HistoryValidationError};
use crate::task::domain::{
    OwnerId, Task, TaskDescription, TaskId, TaskPriority, TaskTitle,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Archived copy of a completed task.
///
/// A record is immutable after creation: no mutating operation exists
/// anywhere in this crate, and correcting one means deleting and
/// re-archiving. The copy is one-way and one-time; after archival the record
/// and its source task evolve independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    id: HistoryRecordId,
    owner_id: OwnerId,
    source_task_id: TaskId,
    title: TaskTitle,
    description: TaskDescription,
    group_label: Option<GroupLabel>,
    priority: TaskPriority,
    completed_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted history record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedHistoryData {
    /// Persisted record identifier.
    pub id: HistoryRecordId,
    /// Persisted owner identifier.
    pub owner_id: OwnerId,
    /// Persisted source task identifier.
    pub source_task_id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted group label, if the task was grouped at archival time.
    pub group_label: Option<GroupLabel>,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted completion moment of the source task.
    pub completed_at: DateTime<Utc>,
    /// Persisted archival moment.
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedHistoryData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            source_task_id: data.source_task_id,
            title: data.title,
            description: data.description,
            group_label: data.group_label,
            priority: data.priority,
            completed_at: data.completed_at,
            created_at: data.created_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryRecordId {
        self.id
    }

    /// Returns the owning user's identifier.
    #[must_use]
    pub const fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns the identifier of the task this record was copied from.
    ///
    /// The source task may no longer exist; the identifier is retained
    /// regardless.
    #[must_use]
    pub const fn source_task_id(&self) -> TaskId {
        self.source_task_id
    }

    /// Returns the archived title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the archived description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the archived group label, if any.
    #[must_use]
    pub const fn group_label(&self) -> Option<&GroupLabel> {
        self.group_label.as_ref()
    }

    /// Returns the archived priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the moment the source task was completed.
    #[must_use]
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Returns the moment this record was archived.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Unvalidated history record input.
///
/// The draft is the single construction path for new records: building it
/// validates every constraint and reports the complete list of violations,
/// not just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecordDraft {
    id: Option<HistoryRecordId>,
    owner_id: String,
    source_task_id: TaskId,
    title: String,
    description: String,
    group_label: Option<String>,
    priority: TaskPriority,
    completed_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl HistoryRecordDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub fn new(
        owner_id: impl Into<String>,
        source_task_id: TaskId,
        title: impl Into<String>,
        priority: TaskPriority,
        completed_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            owner_id: owner_id.into(),
            source_task_id,
            title: title.into(),
            description: String::new(),
            group_label: None,
            priority,
            completed_at,
            created_at,
        }
    }

    /// Creates a draft carrying a completed task's fields.
    ///
    /// `completed_at` is supplied by the caller so tasks that reached
    /// archival without passing through the normal done transition still get
    /// a completion moment.
    #[must_use]
    pub fn from_task(
        task: &Task,
        group_label: Option<&GroupLabel>,
        completed_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            owner_id: task.owner_id().as_str().to_owned(),
            source_task_id: task.id(),
            title: task.title().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            group_label: group_label.map(|label| label.as_str().to_owned()),
            priority: task.priority(),
            completed_at,
            created_at,
        }
    }

    /// Supplies an explicit record identifier instead of a generated one.
    #[must_use]
    pub const fn with_id(mut self, id: HistoryRecordId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the archived description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the archived group label.
    #[must_use]
    pub fn with_group_label(mut self, label: impl Into<String>) -> Self {
        self.group_label = Some(label.into());
        self
    }

    /// Validates the draft and produces the record.
    ///
    /// A missing identifier is generated here.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryValidationError`] carrying **every** violated
    /// constraint.
    pub fn build(self) -> Result<HistoryRecord, HistoryValidationError> {
        let mut violations = Vec::new();

        let owner_id = collect(OwnerId::new(self.owner_id), &mut violations);
        let title = collect(TaskTitle::new(self.title), &mut violations);
        let description = collect(TaskDescription::new(self.description), &mut violations);
        let group_label = match self.group_label {
            Some(raw) => collect_label(GroupLabel::new(raw), &mut violations),
            None => Some(None),
        };

        match (owner_id, title, description, group_label) {
            (Some(owner_id), Some(title), Some(description), Some(group_label))
                if violations.is_empty() =>
            {
                Ok(HistoryRecord {
                    id: self.id.unwrap_or_default(),
                    owner_id,
                    source_task_id: self.source_task_id,
                    title,
                    description,
                    group_label,
                    priority: self.priority,
                    completed_at: self.completed_at,
                    created_at: self.created_at,
                })
            }
            _ => Err(HistoryValidationError::multiple(violations)),
        }
    }
}

/// Records a task-domain validation failure and yields the value on success.
fn collect<T>(
    result: Result<T, crate::task::domain::TaskDomainError>,
    violations: &mut Vec<HistoryValidationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            violations.push(err.into());
            None
        }
    }
}

/// Records a label validation failure and yields the label on success.
fn collect_label(
    result: Result<GroupLabel, HistoryValidationError>,
    violations: &mut Vec<HistoryValidationError>,
) -> Option<Option<GroupLabel>> {
    match result {
        Ok(label) => Some(Some(label)),
        Err(err) => {
            violations.push(err);
            None
        }
    }
}
