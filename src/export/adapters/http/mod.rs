//! HTTP adapter for a Content-API-style template registry.

mod client;
mod wire;

pub use client::HttpContentRegistry;
pub use wire::classify_error;
