//! In-memory integration tests over the public crate API.
//!
//! Tests are organized into modules by functionality:
//! - `archival_flow_tests`: Task completion, archival, and the
//!   at-most-once guard
//! - `history_query_tests`: Pagination envelopes, filtering, and
//!   statistics consistency

mod in_memory {
    pub mod helpers;

    mod archival_flow_tests;
    mod history_query_tests;
}
