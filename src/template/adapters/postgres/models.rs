//! Diesel row models for template persistence.

use super::schema::{template_variables, template_versions, templates};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for templates.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TemplateRow {
    /// Template identifier.
    pub id: uuid::Uuid,
    /// Owning operator.
    pub owner_id: uuid::Uuid,
    /// Template name.
    pub name: String,
    /// Sequence slot.
    pub template_type: String,
    /// Free-text description.
    pub description: String,
    /// Soft-delete timestamp.
    pub archived_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for templates.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = templates)]
pub struct NewTemplateRow {
    /// Template identifier.
    pub id: uuid::Uuid,
    /// Owning operator.
    pub owner_id: uuid::Uuid,
    /// Template name.
    pub name: String,
    /// Sequence slot.
    pub template_type: String,
    /// Free-text description.
    pub description: String,
    /// Soft-delete timestamp.
    pub archived_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for mutable template attributes.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = templates)]
#[diesel(treat_none_as_null = true)]
pub struct TemplateChangeset {
    /// Template name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Soft-delete timestamp.
    pub archived_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for template versions.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = template_versions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TemplateVersionRow {
    /// Version identifier.
    pub id: uuid::Uuid,
    /// Owning template.
    pub template_id: uuid::Uuid,
    /// Version counter.
    pub version_number: i32,
    /// Raw body text.
    pub body_text: String,
    /// Active flag.
    pub is_active: bool,
    /// External content identifier.
    pub external_content_id: Option<String>,
    /// External approval status.
    pub external_approval_status: String,
    /// Last contact with the registry.
    pub last_synced_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Author.
    pub created_by: uuid::Uuid,
}

/// Insert model for template versions.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = template_versions)]
pub struct NewTemplateVersionRow {
    /// Version identifier.
    pub id: uuid::Uuid,
    /// Owning template.
    pub template_id: uuid::Uuid,
    /// Version counter.
    pub version_number: i32,
    /// Raw body text.
    pub body_text: String,
    /// Active flag.
    pub is_active: bool,
    /// External content identifier.
    pub external_content_id: Option<String>,
    /// External approval status.
    pub external_approval_status: String,
    /// Last contact with the registry.
    pub last_synced_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Author.
    pub created_by: uuid::Uuid,
}

/// Row shared by queries and inserts for variable mappings.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = template_variables)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TemplateVariableRow {
    /// Owning version.
    pub template_version_id: uuid::Uuid,
    /// Mapped catalog entry.
    pub catalog_entry_id: uuid::Uuid,
    /// One-indexed position.
    pub position: i32,
}
