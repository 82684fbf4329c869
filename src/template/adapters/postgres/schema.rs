//! Diesel schema for template persistence.

diesel::table! {
    /// Owner templates.
    templates (id) {
        /// Template identifier.
        id -> Uuid,
        /// Owning operator.
        owner_id -> Uuid,
        /// Template name.
        #[max_length = 120]
        name -> Varchar,
        /// Sequence slot.
        #[max_length = 32]
        template_type -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Soft-delete timestamp.
        archived_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Immutable template versions.
    template_versions (id) {
        /// Version identifier.
        id -> Uuid,
        /// Owning template.
        template_id -> Uuid,
        /// Per-template version counter.
        version_number -> Int4,
        /// Raw body text with `{key}` placeholders.
        body_text -> Text,
        /// Active flag, unique per template when true.
        is_active -> Bool,
        /// External registry content identifier.
        external_content_id -> Nullable<Text>,
        /// External approval status.
        #[max_length = 32]
        external_approval_status -> Varchar,
        /// Last contact with the registry.
        last_synced_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Author.
        created_by -> Uuid,
    }
}

diesel::table! {
    /// Position mappings from a version to catalog entries.
    template_variables (template_version_id, position) {
        /// Owning version.
        template_version_id -> Uuid,
        /// Mapped catalog entry.
        catalog_entry_id -> Uuid,
        /// One-indexed position.
        position -> Int4,
    }
}

diesel::joinable!(template_versions -> templates (template_id));
diesel::joinable!(template_variables -> template_versions (template_version_id));
diesel::allow_tables_to_appear_in_same_query!(templates, template_versions, template_variables);
