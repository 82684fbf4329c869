//! Adapter implementations of resolution ports.

pub mod memory;
