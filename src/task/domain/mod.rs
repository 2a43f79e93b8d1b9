//! Domain model for task lifecycle management.
//!
//! The task domain models owner-scoped task creation, the status/priority
//! state machine, and the query configuration used by live task scans,
//! keeping all infrastructure concerns outside of the domain boundary.

mod error;
mod filter;
mod ids;
mod status;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use filter::{PriorityCounts, StatusCounts, TaskListFilter};
pub use ids::{GroupId, OwnerId, TaskDescription, TaskId, TaskTitle};
pub use status::{TaskPriority, TaskStatus};
pub use task::{PersistedTaskData, Task};
