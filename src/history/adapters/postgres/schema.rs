//! Diesel schema for completion history persistence.
//!
//! The backing table carries a unique index on `source_task_id`
//! (`idx_history_records_source_task_unique`). That index, not the
//! application-level existence check, is what makes at-most-once archival
//! race-free.

diesel::table! {
    /// Immutable archived copies of completed tasks.
    history_records (id) {
        /// Record identifier.
        id -> Uuid,
        /// Owning user's identifier.
        #[max_length = 255]
        owner_id -> Varchar,
        /// Identifier of the task the record was copied from.
        source_task_id -> Uuid,
        /// Archived title.
        #[max_length = 255]
        title -> Varchar,
        /// Archived description.
        description -> Text,
        /// Denormalized group label at archival time.
        #[max_length = 255]
        group_label -> Nullable<Varchar>,
        /// Archived priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Completion moment of the source task.
        completed_at -> Timestamptz,
        /// Archival moment.
        created_at -> Timestamptz,
    }
}
