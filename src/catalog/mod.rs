//! Global variable catalog.
//!
//! The catalog is the registry of every `{key}` a template body may
//! reference, together with a declaration of where the value comes from at
//! send time (recipient record, owner profile, agent configuration, or a
//! value computed from the recipient). It is global rather than
//! owner-scoped and read-mostly: entries are registered once and never
//! edited, so template versions can safely snapshot them.
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
