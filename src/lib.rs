//! Missive: template versioning and variable resolution for outbound
//! messaging sequences.
//!
//! Owners author message templates with `{key}` placeholders bound to a
//! shared variable catalog. Every edit produces an immutable version, and the
//! engine resolves those placeholders against recipient, owner, and agent
//! records before a message is previewed, exported to an external content
//! registry, or selected for an agent's outreach slot.
//!
//! # Architecture
//!
//! Missive follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`catalog`]: Global variable catalog and source paths
//! - [`template`]: Template aggregates, versions, and body validation
//! - [`resolution`]: Variable resolution chain, previews, and sample data
//! - [`export`]: Conversion to positional bodies and registry submission
//! - [`assignment`]: Agent template assignment and active-template lookup

pub mod assignment;
pub mod catalog;
pub mod error;
pub mod export;
mod identifier;
pub mod resolution;
pub mod template;
pub mod tenancy;
