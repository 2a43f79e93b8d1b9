//! Identifier and validated scalar types for the history domain.

use super::HistoryValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a history record, distinct from the source task id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryRecordId(Uuid);

impl HistoryRecordId {
    /// Creates a new random record identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a record identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for HistoryRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for HistoryRecordId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for HistoryRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Denormalized group display name carried on a history record.
///
/// A plain label, not a foreign key: records stay readable after the
/// originating group is renamed or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupLabel(String);

impl GroupLabel {
    /// Largest label length accepted by the persisted schema.
    pub const MAX_CHARS: usize = 255;

    /// Label substituted for records archived without a group.
    pub const UNGROUPED: &'static str = "Ungrouped";

    /// Creates a validated group label.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryValidationError::EmptyGroupLabel`] when the value is
    /// blank after trimming, or
    /// [`HistoryValidationError::GroupLabelTooLong`] when it exceeds
    /// [`Self::MAX_CHARS`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, HistoryValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(HistoryValidationError::EmptyGroupLabel);
        }
        let length = raw.chars().count();
        if length > Self::MAX_CHARS {
            return Err(HistoryValidationError::GroupLabelTooLong {
                actual: length,
                limit: Self::MAX_CHARS,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the sentinel label for records without a group.
    #[must_use]
    pub fn ungrouped() -> Self {
        Self(Self::UNGROUPED.to_owned())
    }

    /// Returns the label as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for GroupLabel {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
