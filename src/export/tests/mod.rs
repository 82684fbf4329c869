//! Unit tests for template export.
