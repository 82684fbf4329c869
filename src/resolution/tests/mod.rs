//! Unit tests for variable resolution.
