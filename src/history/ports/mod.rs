//! Port contracts for the completion history.
//!
//! Ports define infrastructure-agnostic interfaces used by the archival and
//! analytics services.

pub mod repository;

pub use repository::{ArchiveRepository, ArchiveRepositoryError, ArchiveRepositoryResult};
