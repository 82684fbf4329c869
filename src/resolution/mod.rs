//! Variable resolution against sample data or real recipient records.
//!
//! Resolution walks each template variable through a fixed precedence chain
//! and never fails for missing data: a variable with no value renders as a
//! visible `{key}` placeholder, is flagged `missing`, and produces a warning.
//! Callers decide whether a missing variable blocks sending.
//!
//! - Domain types and the precedence chain in [`domain`]
//! - Port contracts for recipient data and sample sets in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
