//! Template authoring, validation, and version history.
//!
//! A template belongs to one owner and carries an append-only history of
//! immutable versions. Exactly one version is active once any exists, and
//! content changes only by appending a new version. Every write passes the
//! pure validator in [`validation`] first.
//!
//! - Domain types in [`domain`]
//! - Validation pipeline in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
