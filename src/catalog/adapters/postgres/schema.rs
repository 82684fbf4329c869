//! Diesel schema for catalog persistence.

diesel::table! {
    /// Global variable catalog.
    variable_catalog (id) {
        /// Catalog entry identifier.
        id -> Uuid,
        /// Placeholder key, unique across the catalog.
        #[max_length = 64]
        variable_key -> Varchar,
        /// Human-readable name.
        display_name -> Text,
        /// Author-facing description.
        description -> Text,
        /// Primary source record family.
        #[max_length = 32]
        source_type -> Varchar,
        /// Primary dot-path.
        source_path -> Text,
        /// Secondary source record family.
        #[max_length = 32]
        fallback_source_type -> Nullable<Varchar>,
        /// Secondary dot-path.
        fallback_source_path -> Nullable<Text>,
        /// Static last-resort value.
        fallback_value -> Nullable<Text>,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}
