//! Unit tests for the history context.

mod memory_constraint_tests;
mod record_tests;
