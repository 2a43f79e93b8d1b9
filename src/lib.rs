//! Tasktrail: task completion lifecycle and archival analytics.
//!
//! This crate provides the core behind a short-task manager: the task
//! status/priority state machine, the at-most-once archival of completed
//! tasks into an immutable history, and the aggregation of that history
//! into daily, priority, and group statistics. Identity resolution, HTTP
//! handling, and connection bootstrapping stay outside; a thin transport
//! adapter calls in with an owner identifier and validated parameters and
//! serializes what comes back.
//!
//! # Architecture
//!
//! Tasktrail follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Live tasks and the status/priority state machine
//! - [`history`]: Archival of completed tasks and analytics over the archive

pub mod history;
pub mod task;
