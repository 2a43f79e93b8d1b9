//! Diesel schema for live task persistence.

diesel::table! {
    /// Live task records, one row per task.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user's identifier.
        #[max_length = 255]
        owner_id -> Varchar,
        /// Optional group membership.
        group_id -> Nullable<Uuid>,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Priority level.
        #[max_length = 50]
        priority -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
        /// Completion timestamp, set exactly while the status is done.
        completed_at -> Nullable<Timestamptz>,
    }
}
