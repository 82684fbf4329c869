//! Unit tests for template authoring and versioning.
