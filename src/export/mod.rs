//! Export of template versions to an external content registry.
//!
//! A version body is converted from named `{key}` placeholders to the
//! registry's positional `{{n}}` tokens, submitted under a deterministic
//! friendly name, and sent for approval. The returned content identifier and
//! approval status are persisted on the version.
//!
//! - Conversion, friendly names, and credentials in [`domain`]
//! - Registry and credential ports in [`ports`]
//! - In-memory and HTTP adapters in [`adapters`]
//! - The exporter service in [`services`]

pub mod adapters;
mod config;
pub mod domain;
pub mod ports;
pub mod services;

pub use config::ContentApiConfig;

#[cfg(test)]
mod tests;
