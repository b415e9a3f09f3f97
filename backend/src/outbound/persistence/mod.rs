//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: All database errors are classified before
//!   they cross the port boundary; unique violations and foreign-key misses
//!   keep their meaning instead of collapsing into generic failures.

mod diesel_character_repository;
mod diesel_concept_repository;
mod diesel_error_mapping;
mod diesel_friend_repository;
mod diesel_module_repository;
mod diesel_path_repository;
mod diesel_preferences_repository;
mod diesel_storage_lifecycle;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_character_repository::DieselCharacterRepository;
pub use diesel_concept_repository::DieselConceptRepository;
pub use diesel_friend_repository::DieselFriendRepository;
pub use diesel_module_repository::DieselModuleRepository;
pub use diesel_path_repository::DieselPathRepository;
pub use diesel_preferences_repository::DieselPreferencesRepository;
pub use diesel_storage_lifecycle::DieselStorageLifecycle;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
