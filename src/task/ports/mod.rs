//! Port contracts for live task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task callers.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
