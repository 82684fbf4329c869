//! Diesel row models for catalog persistence.

use super::schema::variable_catalog;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for catalog entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = variable_catalog)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CatalogEntryRow {
    /// Catalog entry identifier.
    pub id: uuid::Uuid,
    /// Placeholder key.
    pub variable_key: String,
    /// Human-readable name.
    pub display_name: String,
    /// Author-facing description.
    pub description: String,
    /// Primary source record family.
    pub source_type: String,
    /// Primary dot-path.
    pub source_path: String,
    /// Secondary source record family.
    pub fallback_source_type: Option<String>,
    /// Secondary dot-path.
    pub fallback_source_path: Option<String>,
    /// Static last-resort value.
    pub fallback_value: Option<String>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for catalog entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = variable_catalog)]
pub struct NewCatalogEntryRow {
    /// Catalog entry identifier.
    pub id: uuid::Uuid,
    /// Placeholder key.
    pub variable_key: String,
    /// Human-readable name.
    pub display_name: String,
    /// Author-facing description.
    pub description: String,
    /// Primary source record family.
    pub source_type: String,
    /// Primary dot-path.
    pub source_path: String,
    /// Secondary source record family.
    pub fallback_source_type: Option<String>,
    /// Secondary dot-path.
    pub fallback_source_path: Option<String>,
    /// Static last-resort value.
    pub fallback_value: Option<String>,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}
