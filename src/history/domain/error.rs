//! Error types for history record validation.

use crate::task::domain::TaskDomainError;
use thiserror::Error;

/// Errors raised while validating a history record draft.
///
/// Validation collects every violated constraint rather than stopping at the
/// first; callers receive the full list via [`Self::violations`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HistoryValidationError {
    /// The owner identifier is empty after trimming.
    #[error("owner identifier must not be empty")]
    EmptyOwner,

    /// The record title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The record title exceeds the persisted column width.
    #[error("title is {actual} characters, exceeds limit of {limit}")]
    TitleTooLong {
        /// The actual character count.
        actual: usize,
        /// The maximum allowed character count.
        limit: usize,
    },

    /// The record description exceeds the persisted column width.
    #[error("description is {actual} characters, exceeds limit of {limit}")]
    DescriptionTooLong {
        /// The actual character count.
        actual: usize,
        /// The maximum allowed character count.
        limit: usize,
    },

    /// The group label is empty after trimming.
    #[error("group label must not be empty")]
    EmptyGroupLabel,

    /// The group label exceeds the persisted column width.
    #[error("group label is {actual} characters, exceeds limit of {limit}")]
    GroupLabelTooLong {
        /// The actual character count.
        actual: usize,
        /// The maximum allowed character count.
        limit: usize,
    },

    /// Multiple validation violations occurred.
    #[error("multiple validation errors: {}", format_errors(.0))]
    Multiple(Vec<Self>),
}

fn format_errors(errors: &[HistoryValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl HistoryValidationError {
    /// Combines multiple violations into a single error.
    ///
    /// A single violation is returned directly rather than wrapped.
    #[must_use]
    pub fn multiple(errors: Vec<Self>) -> Self {
        match errors.len() {
            0 => {
                debug_assert!(false, "multiple() called with empty violations vector");
                Self::Multiple(Vec::new())
            }
            1 => {
                // Length is verified to be 1 immediately above, so this will
                // always yield the sole violation.
                errors
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| Self::Multiple(Vec::new()))
            }
            _ => Self::Multiple(errors),
        }
    }

    /// Returns `true` if this error wraps more than one violation.
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    /// Returns every violated constraint, singular errors included.
    #[must_use]
    pub fn violations(&self) -> &[Self] {
        match self {
            Self::Multiple(errors) => errors,
            other => std::slice::from_ref(other),
        }
    }
}

impl From<TaskDomainError> for HistoryValidationError {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::EmptyOwner => Self::EmptyOwner,
            TaskDomainError::EmptyTitle => Self::EmptyTitle,
            TaskDomainError::TitleTooLong { actual, limit } => {
                Self::TitleTooLong { actual, limit }
            }
            TaskDomainError::DescriptionTooLong { actual, limit } => {
                Self::DescriptionTooLong { actual, limit }
            }
        }
    }
}
