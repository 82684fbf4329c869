//! Adapter implementations of the assignment repository port.

pub mod memory;
pub mod postgres;
