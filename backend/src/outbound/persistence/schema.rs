//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// User accounts.
    ///
    /// `email` carries a unique constraint; `id` is a UUID v4 primary key.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Given name.
        first_name -> Varchar,
        /// Family name.
        last_name -> Varchar,
        /// Normalised login email (unique).
        email -> Varchar,
        /// Bcrypt hash of the password.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Named curriculum tracks.
    ///
    /// `name` carries a unique constraint so paths are addressable by name.
    paths (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique, addressable name.
        name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Units of learning content, each belonging to one path.
    modules (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display title.
        title -> Varchar,
        /// Body content.
        content -> Text,
        /// Owning path (foreign key to `paths.id`).
        path_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Skills and topics users can mark as learned.
    concepts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Concept name.
        name -> Varchar,
        /// Free-form description.
        description -> Text,
    }
}

diesel::table! {
    /// Per-user narrative companions.
    ///
    /// The (user_id, slot) pair carries a unique constraint.
    characters (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user (foreign key to `users.id`).
        user_id -> Uuid,
        /// Per-user slot index.
        slot -> Int4,
        /// Display name.
        name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Friendships between users.
    ///
    /// The (user1_id, user2_id) pair carries a unique constraint; lookups
    /// match either orientation in queries.
    friends (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Requesting user (foreign key to `users.id`).
        user1_id -> Uuid,
        /// Receiving user (foreign key to `users.id`).
        user2_id -> Uuid,
        /// Lifecycle state: `pending` or `accepted`.
        status -> Varchar,
        /// Request creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Join table enrolling users in paths.
    ///
    /// The (user_id, path_id) pair carries a unique constraint; duplicate
    /// joins rely on `ON CONFLICT DO NOTHING`.
    path_memberships (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Enrolled user (foreign key to `users.id`).
        user_id -> Uuid,
        /// Joined path (foreign key to `paths.id`).
        path_id -> Uuid,
        /// Enrolment timestamp.
        joined_at -> Timestamptz,
    }
}

diesel::table! {
    /// Join table recording module completions.
    ///
    /// The (user_id, module_id) pair carries a unique constraint.
    module_completions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Completing user (foreign key to `users.id`).
        user_id -> Uuid,
        /// Completed module (foreign key to `modules.id`).
        module_id -> Uuid,
        /// Completion timestamp.
        completed_at -> Timestamptz,
    }
}

diesel::table! {
    /// Join table recording learned concepts.
    ///
    /// The (user_id, concept_id) pair carries a unique constraint.
    learned_concepts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Learning user (foreign key to `users.id`).
        user_id -> Uuid,
        /// Learned concept (foreign key to `concepts.id`).
        concept_id -> Uuid,
        /// Timestamp the concept was marked learned.
        learned_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user preference settings, one row per user.
    user_preferences (user_id) {
        /// Owning user (primary key, foreign key to `users.id`).
        user_id -> Uuid,
        /// Whether reminder emails are enabled.
        reminder_emails -> Bool,
        /// Whether the profile is visible to non-friends.
        public_profile -> Bool,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(modules -> paths (path_id));
diesel::joinable!(characters -> users (user_id));
diesel::joinable!(path_memberships -> users (user_id));
diesel::joinable!(path_memberships -> paths (path_id));
diesel::joinable!(module_completions -> users (user_id));
diesel::joinable!(module_completions -> modules (module_id));
diesel::joinable!(learned_concepts -> users (user_id));
diesel::joinable!(learned_concepts -> concepts (concept_id));
diesel::joinable!(user_preferences -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    paths,
    modules,
    concepts,
    characters,
    friends,
    path_memberships,
    module_completions,
    learned_concepts,
    user_preferences,
);
