//! Completion history: archival and analytics.
//!
//! This module implements the at-most-once copy of a completed task into an
//! immutable history store, and the aggregation of that store into
//! paginated listings and daily/priority/group summaries. The archival
//! relationship is a one-way, one-time copy: after it, record and source
//! task evolve independently. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
