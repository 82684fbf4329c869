//! Adapter implementations of template ports.

pub mod memory;
pub mod postgres;
