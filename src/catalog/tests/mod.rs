//! Unit tests for the variable catalog.
