//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    characters, concepts, friends, learned_concepts, module_completions, modules,
    path_memberships, paths, user_preferences, users,
};

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Path models
// ---------------------------------------------------------------------------

/// Row struct for reading from the paths table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = paths)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PathRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new path records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = paths)]
pub(crate) struct NewPathRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for enrolling a user in a path.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = path_memberships)]
pub(crate) struct NewPathMembershipRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub path_id: Uuid,
    pub joined_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Module models
// ---------------------------------------------------------------------------

/// Row struct for reading from the modules table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = modules)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ModuleRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub path_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new module records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = modules)]
pub(crate) struct NewModuleRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub content: &'a str,
    pub path_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Changeset struct for partial module updates; `None` fields are skipped.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = modules)]
pub(crate) struct ModuleChangeset<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
}

/// Insertable struct for recording a module completion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = module_completions)]
pub(crate) struct NewModuleCompletionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub module_id: Uuid,
    pub completed_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Concept models
// ---------------------------------------------------------------------------

/// Row struct for reading from the concepts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = concepts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ConceptRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// Insertable struct for creating new concept records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = concepts)]
pub(crate) struct NewConceptRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
}

/// Insertable struct for recording a learned concept.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = learned_concepts)]
pub(crate) struct NewLearnedConceptRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub concept_id: Uuid,
    pub learned_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Character models
// ---------------------------------------------------------------------------

/// Row struct for reading from the characters table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = characters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CharacterRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slot: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new character records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = characters)]
pub(crate) struct NewCharacterRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slot: i32,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Friend models
// ---------------------------------------------------------------------------

/// Row struct for reading from the friends table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = friends)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FriendRow {
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new friendship records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = friends)]
pub(crate) struct NewFriendRow<'a> {
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Preference models
// ---------------------------------------------------------------------------

/// Row struct for reading and writing the user_preferences table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserPreferencesRow {
    pub user_id: Uuid,
    pub reminder_emails: bool,
    pub public_profile: bool,
    pub updated_at: DateTime<Utc>,
}
