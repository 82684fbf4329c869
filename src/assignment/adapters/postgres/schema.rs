//! Diesel schema for assignment persistence.

diesel::table! {
    /// Agent template assignments.
    template_assignments (id) {
        /// Assignment identifier.
        id -> Uuid,
        /// Owner who made the assignment.
        owner_id -> Uuid,
        /// Assigned agent.
        agent_id -> Uuid,
        /// Sequence slot.
        #[max_length = 32]
        template_type -> Varchar,
        /// Assigned template.
        template_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last reassignment timestamp.
        updated_at -> Timestamptz,
    }
}
