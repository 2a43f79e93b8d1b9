//! Adapter implementations of the archive persistence port.

pub mod memory;
pub mod postgres;
