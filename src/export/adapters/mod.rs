//! Adapter implementations of export ports.

pub mod http;
pub mod memory;
