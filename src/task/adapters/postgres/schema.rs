//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with optional generated summaries.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Task priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Importance flag driving summary generation.
        is_important -> Bool,
        /// Generated summary, if any.
        summary -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
