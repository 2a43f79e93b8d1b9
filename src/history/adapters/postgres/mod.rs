//! `PostgreSQL` adapters for completion history persistence.

mod models;
mod repository;
mod schema;

pub use repository::{ArchivePgPool, PostgresArchiveRepository};
