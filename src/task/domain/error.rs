//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the persisted column width.
    #[error("task title is {actual} characters, exceeds limit of {limit}")]
    TitleTooLong {
        /// The actual character count.
        actual: usize,
        /// The maximum allowed character count.
        limit: usize,
    },

    /// The task description exceeds the persisted column width.
    #[error("task description is {actual} characters, exceeds limit of {limit}")]
    DescriptionTooLong {
        /// The actual character count.
        actual: usize,
        /// The maximum allowed character count.
        limit: usize,
    },

    /// The owner identifier is empty after trimming.
    #[error("owner identifier must not be empty")]
    EmptyOwner,
}

/// Error returned while parsing task statuses from transport or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from transport or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
