//! In-memory adapters for live task persistence.

mod task;

pub use task::InMemoryTaskRepository;
