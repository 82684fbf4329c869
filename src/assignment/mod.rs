//! Which template each agent uses for each slot of the message sequence.
//!
//! An assignment pins one template per `(agent, template type)`. Lookups at
//! send time fail open: a missing, archived, or empty assigned template is
//! reported as "no assignment" so the caller falls back to a built-in
//! default instead of breaking a live conversation.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
